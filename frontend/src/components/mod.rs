//! UI Components for the ImageClass application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Image selection with drag & drop, file summary, predict button
//! - [`LoadingOverlay`] - Shown while a prediction is in flight
//! - [`ResultsSection`] - Preview, top prediction and ranked list
//! - [`ErrorBanner`] - Dismissible error message
//!
//! # Shared State
//! - [`PanelSignals`] - Signals the session controller renders into
//! - [`SessionHandle`] - Commands sent to the session controller

mod error;
mod footer;
mod hero;
mod loading;
mod panels;
mod results;
mod upload;

pub use error::*;
pub use footer::*;
pub use hero::*;
pub use loading::*;
pub use panels::*;
pub use results::*;
pub use upload::*;
