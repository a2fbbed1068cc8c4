//! Upload session controller.
//!
//! Maps each UI command to a [`Session`] transition and pushes the
//! resulting panels to an injected [`SessionView`]. Network and file
//! reads go through the [`PredictionService`] and [`PreviewLoader`] ports
//! so the whole flow runs without a browser.

use std::cell::RefCell;

use super::state::{FileCandidate, PredictionTicket, PreviewTicket, Session, SessionState};
use crate::types::{FileSummary, PredictionResponse, ResultsView, SessionError};

/// Rendering capability the controller drives.
pub trait SessionView {
    fn show_upload_prompt(&mut self);
    fn show_file_info(&mut self, summary: &FileSummary);
    fn set_predict_enabled(&mut self, enabled: bool);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_results(&mut self, results: &ResultsView);
    fn show_preview(&mut self, data_url: &str);
    fn hide_results(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// Sends a file to the prediction endpoint.
///
/// Failures to reach the service or decode its answer are
/// [`SessionError::Transport`].
#[allow(async_fn_in_trait)]
pub trait PredictionService<F> {
    async fn predict(&self, file: &F) -> Result<PredictionResponse, SessionError>;
}

/// Reads a file into a data URL for the results preview.
#[allow(async_fn_in_trait)]
pub trait PreviewLoader<F> {
    async fn load_preview(&self, file: &F) -> Option<String>;
}

pub struct UploadController<F, V> {
    session: Session<F>,
    view: V,
}

impl<F: FileCandidate, V: SessionView> UploadController<F, V> {
    /// Create a controller and render the initial state.
    pub fn new(view: V) -> Self {
        let mut controller = Self {
            session: Session::new(),
            view,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &SessionState<F> {
        self.session.state()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn select_file(&mut self, candidate: F) -> Result<(), SessionError> {
        let name = candidate.name();
        let result = self.session.select_file(candidate);
        match &result {
            Ok(()) => log::info!("📎 Selected {}", name),
            Err(e) => log::warn!("⚠️ Rejected {}: {}", name, e),
        }
        self.render();
        result
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
        self.render();
    }

    /// Start a prediction. `None` means nothing to submit.
    pub fn submit_prediction(&mut self) -> Option<PredictionTicket<F>> {
        let ticket = self.session.submit_prediction();
        if ticket.is_some() {
            log::info!("📤 Uploading image for prediction...");
            self.render();
        }
        ticket
    }

    pub fn finish_prediction(
        &mut self,
        ticket: PredictionTicket<F>,
        response: Result<PredictionResponse, SessionError>,
    ) -> Option<PreviewTicket<F>> {
        let generation = ticket.generation();
        if generation != self.session.generation() {
            log::debug!("Discarding stale prediction response (generation {})", generation);
            return None;
        }

        let outcome = response.and_then(PredictionResponse::into_outcome);
        match &outcome {
            Ok(c) => log::info!("✅ Prediction: {} ({:.1}%)", c.label, c.confidence),
            Err(SessionError::Transport(detail)) => log::error!("❌ Prediction request failed: {}", detail),
            Err(e) => log::error!("❌ Prediction failed: {}", e),
        }

        let preview = self.session.finish_prediction(ticket, outcome);
        self.render();
        preview
    }

    pub fn preview_loaded(&mut self, ticket: PreviewTicket<F>, data_url: String) {
        if self.session.preview_loaded(ticket, data_url) {
            self.render();
        } else {
            log::debug!("Discarding stale preview");
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.render();
    }

    pub fn dismiss_error(&mut self) {
        self.session.dismiss_error();
        self.render();
    }

    fn render(&mut self) {
        let panels = self.session.state().panels();

        match &panels.file_info {
            Some(summary) => self.view.show_file_info(summary),
            None => self.view.show_upload_prompt(),
        }
        self.view.set_predict_enabled(panels.predict_enabled);

        if panels.loading {
            self.view.show_loading();
        } else {
            self.view.hide_loading();
        }

        match &panels.results {
            Some(results) => {
                self.view.show_results(results);
                if let Some(url) = &panels.preview {
                    self.view.show_preview(url);
                }
            }
            None => self.view.hide_results(),
        }

        match &panels.error {
            Some(message) => self.view.show_error(message),
            None => self.view.hide_error(),
        }
    }
}

/// Run one submit cycle: upload, apply the answer, then load the preview.
///
/// No borrow of `controller` is held across an await, so UI commands
/// issued meanwhile go through and turn this cycle's results stale.
pub async fn run_prediction<F, V, S, P>(
    controller: &RefCell<UploadController<F, V>>,
    service: &S,
    previews: &P,
) where
    F: FileCandidate,
    V: SessionView,
    S: PredictionService<F>,
    P: PreviewLoader<F>,
{
    let Some(ticket) = controller.borrow_mut().submit_prediction() else {
        return;
    };

    let response = service.predict(ticket.file()).await;
    let Some(preview) = controller.borrow_mut().finish_prediction(ticket, response) else {
        return;
    };

    match previews.load_preview(preview.file()).await {
        Some(data_url) => controller.borrow_mut().preview_loaded(preview, data_url),
        None => log::warn!("Could not read image preview"),
    }
}
