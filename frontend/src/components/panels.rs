//! Reactive panel state and the shared session handle.
//!
//! [`PanelSignals`] is the Leptos implementation of [`SessionView`]: the
//! controller writes, components read. [`SessionHandle`] is provided as
//! context so every component can send commands to the same controller.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use web_sys::File;

use crate::services::{BrowserPreviewLoader, HttpPredictionService};
use crate::session::{run_prediction, SessionView, UploadController};
use crate::types::{FileSummary, ResultsView};

#[derive(Clone, Copy)]
pub struct PanelSignals {
    pub upload_prompt: RwSignal<bool>,
    pub file_info: RwSignal<Option<FileSummary>>,
    pub predict_enabled: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub results: RwSignal<Option<ResultsView>>,
    pub preview: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
}

impl PanelSignals {
    pub fn new() -> Self {
        Self {
            upload_prompt: create_rw_signal(true),
            file_info: create_rw_signal(None),
            predict_enabled: create_rw_signal(false),
            loading: create_rw_signal(false),
            results: create_rw_signal(None),
            preview: create_rw_signal(None),
            error: create_rw_signal(None),
        }
    }
}

impl Default for PanelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionView for PanelSignals {
    fn show_upload_prompt(&mut self) {
        self.file_info.set(None);
        self.upload_prompt.set(true);
    }

    fn show_file_info(&mut self, summary: &FileSummary) {
        self.file_info.set(Some(summary.clone()));
        self.upload_prompt.set(false);
    }

    fn set_predict_enabled(&mut self, enabled: bool) {
        self.predict_enabled.set(enabled);
    }

    fn show_loading(&mut self) {
        self.loading.set(true);
    }

    fn hide_loading(&mut self) {
        self.loading.set(false);
    }

    fn show_results(&mut self, results: &ResultsView) {
        if self.results.get_untracked().as_ref() != Some(results) {
            self.preview.set(None);
            self.results.set(Some(results.clone()));
        }
    }

    fn show_preview(&mut self, data_url: &str) {
        self.preview.set(Some(data_url.to_string()));
    }

    fn hide_results(&mut self) {
        self.results.set(None);
        self.preview.set(None);
    }

    fn show_error(&mut self, message: &str) {
        self.error.set(Some(message.to_string()));
    }

    fn hide_error(&mut self) {
        self.error.set(None);
    }
}

type BrowserController = UploadController<File, PanelSignals>;

/// Cloneable entry point for UI commands.
#[derive(Clone)]
pub struct SessionHandle {
    controller: Rc<RefCell<BrowserController>>,
    service: Rc<HttpPredictionService>,
}

impl SessionHandle {
    pub fn new(panels: PanelSignals, service: HttpPredictionService) -> Self {
        Self {
            controller: Rc::new(RefCell::new(UploadController::new(panels))),
            service: Rc::new(service),
        }
    }

    pub fn select_file(&self, file: File) {
        // Rejections are already on screen through the error panel
        let _ = self.controller.borrow_mut().select_file(file);
    }

    pub fn clear_selection(&self) {
        self.controller.borrow_mut().clear_selection();
    }

    pub fn submit_prediction(&self) {
        let handle = self.clone();
        spawn_local(async move {
            run_prediction(&handle.controller, handle.service.as_ref(), &BrowserPreviewLoader).await;
        });
    }

    pub fn reset(&self) {
        self.controller.borrow_mut().reset();
    }

    pub fn dismiss_error(&self) {
        self.controller.borrow_mut().dismiss_error();
    }
}
