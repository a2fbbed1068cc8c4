//! Domain models for prediction requests and responses.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "success": true,
//!   "prediction": "cat",
//!   "confidence": 97.3,
//!   "all_predictions": [{"class": "cat", "confidence": 97.3}, ...]
//! }
//! ```
//!
//! Failures carry `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ClientResult;
use crate::validation;

/// One label and its confidence in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub class: String,
    pub confidence: f64,
}

/// Body returned by `/predict`, both upstream and by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_predictions: Vec<ClassScore>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    /// A failure body with the given message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            prediction: None,
            confidence: None,
            all_predictions: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Sort by descending confidence and keep the best `top_k`.
    pub fn ranked(mut self, top_k: usize) -> Self {
        self.all_predictions
            .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        self.all_predictions.truncate(top_k);
        self
    }
}

/// An image ready to be sent as the `image` multipart part.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read and check a local image file.
    pub async fn from_path(path: &Path, limit: u64) -> ClientResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        validation::validate_upload(&file_name, bytes.len() as u64, limit)?;

        Ok(Self {
            content_type: validation::content_type_for(&file_name).to_string(),
            file_name,
            bytes,
        })
    }
}
