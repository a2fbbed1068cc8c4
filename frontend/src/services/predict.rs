//! HTTP service for uploading images to the prediction endpoint

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::config::{IMAGE_FIELD, PREDICT_ENDPOINT};
use crate::session::PredictionService;
use crate::types::{PredictionResponse, SessionError};

/// Uploads the selected image as `multipart/form-data`.
pub struct HttpPredictionService {
    endpoint: String,
}

impl HttpPredictionService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpPredictionService {
    fn default() -> Self {
        Self::new(PREDICT_ENDPOINT)
    }
}

impl PredictionService<File> for HttpPredictionService {
    async fn predict(&self, file: &File) -> Result<PredictionResponse, SessionError> {
        let form_data = FormData::new()
            .map_err(|e| SessionError::Transport(format!("Failed to create FormData: {:?}", e)))?;

        form_data
            .append_with_blob_and_filename(IMAGE_FIELD, file, &file.name())
            .map_err(|e| SessionError::Transport(format!("Failed to append file: {:?}", e)))?;

        let request = Request::post(&self.endpoint)
            .body(form_data)
            .map_err(|e| SessionError::Transport(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| SessionError::Transport(format!("HTTP request failed: {}", e)))?;

        // Error statuses still carry a JSON body with `success: false`
        if !response.ok() {
            log::warn!("Prediction endpoint answered {}", response.status());
        }

        response
            .json::<PredictionResponse>()
            .await
            .map_err(|e| SessionError::Transport(format!("Failed to parse response: {}", e)))
    }
}
