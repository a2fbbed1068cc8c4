//! ImageClass - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading an image to a classification
//! service and showing what it most likely depicts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, known classes)                            │
//! │  ├── UploadSection (drop zone, file info, predict)          │
//! │  ├── ErrorBanner                                            │
//! │  ├── ResultsSection (preview, prediction, ranked list)      │
//! │  └── LoadingOverlay                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Components only read [`PanelSignals`]; every user action goes through
//! [`SessionHandle`] to the [`session::UploadController`], which decides
//! what the panels show.
//!
//! # Modules
//!
//! - [`types`] - API response, display and error types
//! - [`session`] - Upload session state machine and controller
//! - [`components`] - UI components
//! - [`services`] - Prediction upload and preview reading

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod session;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // API
    ClassScore, PredictionResponse, Classification,
    // Display
    FileSummary, RankedRow, ResultsView, format_file_size, format_confidence,
    // Errors
    ErrorKind, SessionError,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and console logger, then mount the app.
pub fn run() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 ImageClass - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Image Recognition"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // The controller renders the initial state into the signals on creation
    let panels = PanelSignals::new();
    let session = SessionHandle::new(panels, HttpPredictionService::default());

    provide_context(panels);
    provide_context(session);

    view! {
        <div class="container">
            <Hero/>
            <UploadSection/>
            <ErrorBanner/>
            <ResultsSection/>
        </div>

        <LoadingOverlay/>
        <Footer/>
    }
}
