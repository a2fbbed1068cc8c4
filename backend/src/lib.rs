//! # ImageClass - gateway and client for an image classification model
//!
//! The gateway serves the web frontend and forwards uploaded images to a
//! prediction service, after checking them the same way the browser does.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Browser /  │────▶│   Gateway    │────▶│ Prediction  │
//! │     CLI     │     │ (check+rank) │     │   service   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imageclass::{GatewayConfig, server::start_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GatewayConfig::from_env().unwrap();
//!     start_server(config).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`models`] - Prediction bodies and uploads
//! - [`validation`] - File name and size checks
//! - [`client`] - Prediction service client
//! - [`api`] - HTTP gateway

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Checks
pub mod validation;

// Upstream
pub mod client;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::GatewayConfig;

pub use error::{
    ClientError, ClientResult, ConfigError, ConfigResult, ServerError, ServerResult, UploadError,
    UploadResult,
};

pub use models::{ClassScore, ImageUpload, PredictResponse};

pub use validation::{allowed_file, validate_upload, ALLOWED_EXTENSIONS};

pub use client::{HealthStatus, PredictionClient, UpstreamReply};

pub use api::{error_response, router, AppState};

// Server
pub mod server {
    pub use crate::api::{serve_from_env, start_server};
}
