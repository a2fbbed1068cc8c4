//! Error types for the ImageClass gateway and CLI.
//!
//! - [`UploadError`] - Rejected uploads (server-side and CLI checks)
//! - [`ClientError`] - Talking to the upstream prediction service
//! - [`ConfigError`] - Invalid environment configuration
//! - [`ServerError`] - Top-level gateway errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Upload Errors
// =============================================================================

/// Why an upload was refused before reaching the model.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No `image` part in the multipart body.
    #[error("No image file provided")]
    MissingImage,

    /// The `image` part has an empty file name.
    #[error("No file selected")]
    EmptyFileName,

    /// Extension outside the allow-list.
    #[error("Invalid file type. Please upload PNG, JPG, JPEG, GIF, BMP, or WEBP files.")]
    InvalidType,

    /// Larger than the upload limit.
    #[error("File size must be less than {}MB.", .limit / (1024 * 1024))]
    TooLarge { limit: u64 },

    /// The multipart body could not be read.
    #[error("Error reading upload: {0}")]
    Unreadable(String),
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors from the prediction service client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something that is not the expected JSON.
    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),

    /// Reading the local image failed.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// The local image was refused before upload.
    #[error("{0}")]
    Upload(#[from] UploadError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Server Errors (top-level)
// =============================================================================

/// HTTP gateway errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for upload checks.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_messages() {
        assert_eq!(UploadError::MissingImage.to_string(), "No image file provided");
        assert_eq!(UploadError::EmptyFileName.to_string(), "No file selected");
        let err = UploadError::TooLarge { limit: 16 << 20 };
        assert_eq!(err.to_string(), "File size must be less than 16MB.");
    }

    #[test]
    fn test_error_conversion_chain() {
        let client_err: ClientError = UploadError::InvalidType.into();
        assert!(client_err.to_string().starts_with("Invalid file type"));

        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let server_err: ServerError = io_err.into();
        assert!(server_err.to_string().contains("port taken"));

        let config_err = ConfigError::InvalidValue { key: "IMAGECLASS_PORT".into(), value: "abc".into() };
        let server_err: ServerError = config_err.into();
        assert!(server_err.to_string().contains("IMAGECLASS_PORT"));
    }
}
