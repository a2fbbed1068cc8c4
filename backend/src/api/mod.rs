//! HTTP API module.
//!
//! This module provides the HTTP gateway and API helpers for the ImageClass backend.

pub mod server;
pub mod types;

pub use server::{router, serve_from_env, start_server, AppState};
pub use types::*;
