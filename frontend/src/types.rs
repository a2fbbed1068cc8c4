//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **API Types** - Prediction endpoint response structures
//! - **Display Types** - Pre-formatted values handed to the view
//! - **Error Types** - Session error handling

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DEFAULT_PREDICTION_ERROR, MAX_UPLOAD_BYTES, NETWORK_ERROR_MESSAGE};

// =============================================================================
// API Response Types
// =============================================================================

/// One label and its score, as ranked by the prediction service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// Label name
    pub class: String,
    /// Confidence in percent (0-100)
    pub confidence: f64,
}

/// Response from the prediction endpoint.
///
/// Every field except `success` is optional on the wire; which ones are
/// present depends on the outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    /// Top label (success only)
    #[serde(default)]
    pub prediction: Option<String>,
    /// Top confidence in percent (success only)
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Ranked labels, service order (success only)
    #[serde(default)]
    pub all_predictions: Vec<ClassScore>,
    /// Failure explanation (failure only, may be absent)
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
    pub ranked: Vec<ClassScore>,
}

impl PredictionResponse {
    /// Interpret the response body.
    ///
    /// A body claiming success without a label or confidence cannot be
    /// rendered and counts as a transport failure.
    pub fn into_outcome(self) -> Result<Classification, SessionError> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| DEFAULT_PREDICTION_ERROR.to_string());
            return Err(SessionError::Service(message));
        }

        match (self.prediction, self.confidence) {
            (Some(label), Some(confidence)) => Ok(Classification {
                label,
                confidence,
                ranked: self.all_predictions,
            }),
            _ => Err(SessionError::Transport(
                "success response without prediction or confidence".to_string(),
            )),
        }
    }
}

// =============================================================================
// Display Types
// =============================================================================

/// Name and human-readable size of the selected file.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSummary {
    pub name: String,
    pub size_label: String,
}

/// One row of the ranked prediction list.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
    pub class: String,
    /// e.g. `"97.3%"`
    pub confidence_label: String,
}

/// Everything the results panel shows, already formatted.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsView {
    pub label: String,
    pub confidence_label: String,
    pub rows: Vec<RankedRow>,
}

impl From<&Classification> for ResultsView {
    fn from(classification: &Classification) -> Self {
        ResultsView {
            label: classification.label.clone(),
            confidence_label: format_confidence(classification.confidence),
            rows: classification
                .ranked
                .iter()
                .map(|score| RankedRow {
                    class: score.class.clone(),
                    confidence_label: format_confidence(score.confidence),
                })
                .collect(),
        }
    }
}

/// Format a percentage with one decimal and a `%` suffix.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence)
}

/// Format a byte count using base-1024 units.
///
/// The value keeps at most two decimals, trailing zeros dropped:
/// `1536` gives `"1.5 KB"`, `1048576` gives `"1 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // floor(log1024(bytes)), computed without floating point drift
    let mut index = 0;
    let mut scale: u64 = 1;
    while index + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        index += 1;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, UNITS[index])
}

// =============================================================================
// Error Types
// =============================================================================

/// Broad family of a [`SessionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network call.
    Validation,
    /// The service answered `success: false`.
    Service,
    /// The exchange itself failed.
    Transport,
}

/// Errors surfaced by the upload session.
///
/// All of them end up as text in the single error panel.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// Candidate MIME type is not `image/*`.
    InvalidType { mime_type: String },
    /// Candidate is larger than the upload limit.
    TooLarge { size: u64 },
    /// The service reported a failure.
    Service(String),
    /// Network or decoding failure; the detail is for logs only.
    Transport(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidType { .. } | SessionError::TooLarge { .. } => {
                ErrorKind::Validation
            }
            SessionError::Service(_) => ErrorKind::Service,
            SessionError::Transport(_) => ErrorKind::Transport,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidType { .. } => write!(f, "Please select a valid image file."),
            SessionError::TooLarge { .. } => write!(
                f,
                "File size must be less than {}MB.",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            ),
            SessionError::Service(msg) => write!(f, "{}", msg),
            SessionError::Transport(_) => write!(f, "{}", NETWORK_ERROR_MESSAGE),
        }
    }
}

impl std::error::Error for SessionError {}
