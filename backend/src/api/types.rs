//! REST API helpers shared by the gateway handlers.

use axum::{http::StatusCode, Json};

use crate::error::UploadError;
use crate::models::PredictResponse;

/// A handler reply: status plus `/predict` body.
pub type PredictReply = (StatusCode, Json<PredictResponse>);

impl UploadError {
    /// HTTP status returned for this rejection.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Create an error response
pub fn error_response(status: StatusCode, error: impl Into<String>) -> PredictReply {
    (status, Json(PredictResponse::failure(error)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_status_codes() {
        assert_eq!(UploadError::MissingImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(UploadError::InvalidType.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UploadError::TooLarge { limit: 1 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_error_response_body() {
        let (status, Json(body)) = error_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("upstream down"));
    }
}
