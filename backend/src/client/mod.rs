//! HTTP client for the upstream prediction service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imageclass::client::PredictionClient;
//! use imageclass::models::ImageUpload;
//!
//! let client = PredictionClient::new("http://127.0.0.1:8000");
//! let upload = ImageUpload::from_path("cat.png".as_ref(), 16 << 20).await?;
//! let reply = client.predict(&upload).await?;
//! println!("{:?}", reply.body.prediction);
//! ```

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::models::{ImageUpload, PredictResponse};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Status and decoded body of an upstream `/predict` call.
///
/// Failure bodies come with 4xx/5xx statuses and are still decoded.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: PredictResponse,
}

/// Body of `/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_status: String,
}

impl HealthStatus {
    pub fn error(model_status: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            model_status: model_status.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload an image to `/predict`.
    pub async fn predict(&self, upload: &ImageUpload) -> ClientResult<UpstreamReply> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(format!("{}/predict", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str::<PredictResponse>(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("status {}: {} ({})", status, e, truncate(&text, 200)))
        })?;

        Ok(UpstreamReply { status, body })
    }

    /// Query `/health`.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        assert_eq!(PredictionClient::new("http://localhost:8000/").base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "model_status": "Model loaded successfully"}"#).unwrap();
        assert!(status.is_healthy());
        assert!(!HealthStatus::error("Model file not found").is_healthy());
    }
}
