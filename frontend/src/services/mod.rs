//! Browser-facing services.
//!
//! # Services
//!
//! - [`predict`] - Multipart upload to the prediction endpoint
//! - [`preview`] - Local file metadata and data-URL previews

pub mod predict;
pub mod preview;

pub use predict::*;
pub use preview::*;
