//! Upload session: selection, validation, prediction and result display.
//!
//! # Module Structure
//!
//! - [`state`] - Pure state machine (`Empty`, `FileSelected`, `Loading`,
//!   `Results`, `Error`) and the panels it implies
//! - [`controller`] - Command handlers, view/service ports, submit cycle
//!
//! # Flow
//!
//! ```text
//! Empty ──select──▶ FileSelected ──submit──▶ Loading ──ok──▶ Results
//!                        ▲                      │
//!                        └──── dismiss ◀── Error ◀┘ (service / network)
//! ```
//!
//! `reset` returns every state to `Empty`.

pub mod controller;
pub mod state;

pub use controller::{run_prediction, PredictionService, PreviewLoader, SessionView, UploadController};
pub use state::{
    validate_candidate, FileCandidate, Panels, PredictionTicket, PreviewTicket, SelectedFile,
    Session, SessionState,
};
