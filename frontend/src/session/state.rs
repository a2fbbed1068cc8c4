//! Upload session state machine.
//!
//! [`Session`] is the single source of truth for what the page shows. It
//! performs no I/O: async work is represented by tickets carrying the
//! generation they were issued under, and completions for an older
//! generation are ignored.

use crate::config::{ACCEPTED_MIME_PREFIX, MAX_UPLOAD_BYTES};
use crate::types::{format_file_size, Classification, FileSummary, ResultsView, SessionError};

/// A file the user picked or dropped, before validation.
pub trait FileCandidate: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn mime_type(&self) -> String;
}

/// A candidate that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<F> {
    pub handle: F,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl<F> SelectedFile<F> {
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            size_label: format_file_size(self.size),
        }
    }
}

/// Check a candidate against the type and size rules.
pub fn validate_candidate<F: FileCandidate>(candidate: F) -> Result<SelectedFile<F>, SessionError> {
    let mime_type = candidate.mime_type();
    if !mime_type.starts_with(ACCEPTED_MIME_PREFIX) {
        return Err(SessionError::InvalidType { mime_type });
    }

    let size = candidate.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(SessionError::TooLarge { size });
    }

    Ok(SelectedFile {
        name: candidate.name(),
        size,
        mime_type,
        handle: candidate,
    })
}

/// What the page is currently showing.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState<F> {
    Empty,
    FileSelected {
        file: SelectedFile<F>,
    },
    Loading {
        file: SelectedFile<F>,
    },
    Results {
        file: SelectedFile<F>,
        results: ResultsView,
        preview: Option<String>,
    },
    /// Error panel shown over another state, restored on dismiss.
    ///
    /// `underlying` is never itself an `Error`.
    Error {
        error: SessionError,
        underlying: Box<SessionState<F>>,
    },
}

impl<F> SessionState<F> {
    /// The state without any error overlay.
    pub fn base(&self) -> &SessionState<F> {
        match self {
            SessionState::Error { underlying, .. } => underlying,
            other => other,
        }
    }

    pub fn error(&self) -> Option<&SessionError> {
        match self {
            SessionState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile<F>> {
        match self.base() {
            SessionState::FileSelected { file }
            | SessionState::Loading { file }
            | SessionState::Results { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.base(), SessionState::Loading { .. })
    }

    /// Panel visibility implied by this state.
    pub fn panels(&self) -> Panels {
        let mut panels = Panels::default();

        match self.base() {
            SessionState::Empty | SessionState::Error { .. } => {
                panels.upload_prompt = true;
            }
            SessionState::FileSelected { file } => {
                panels.file_info = Some(file.summary());
                panels.predict_enabled = true;
            }
            SessionState::Loading { file } => {
                panels.file_info = Some(file.summary());
                panels.loading = true;
            }
            SessionState::Results {
                file,
                results,
                preview,
            } => {
                panels.file_info = Some(file.summary());
                panels.predict_enabled = true;
                panels.results = Some(results.clone());
                panels.preview = preview.clone();
            }
        }

        panels.error = self.error().map(|e| e.to_string());
        panels
    }
}

/// Visibility and content of the five page regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Panels {
    pub upload_prompt: bool,
    pub file_info: Option<FileSummary>,
    pub predict_enabled: bool,
    pub loading: bool,
    pub results: Option<ResultsView>,
    pub preview: Option<String>,
    pub error: Option<String>,
}

/// Outstanding prediction request.
#[derive(Clone, Debug)]
pub struct PredictionTicket<F> {
    generation: u64,
    file: F,
}

impl<F> PredictionTicket<F> {
    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outstanding preview read for the file whose results are shown.
#[derive(Clone, Debug)]
pub struct PreviewTicket<F> {
    generation: u64,
    file: F,
}

impl<F> PreviewTicket<F> {
    pub fn file(&self) -> &F {
        &self.file
    }
}

/// One upload session per page load.
#[derive(Clone, Debug, PartialEq)]
pub struct Session<F> {
    state: SessionState<F>,
    generation: u64,
}

impl<F> Default for Session<F> {
    fn default() -> Self {
        Self {
            state: SessionState::Empty,
            generation: 0,
        }
    }
}

impl<F: FileCandidate> Session<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState<F> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate and select a file.
    ///
    /// On rejection the previous selection and any in-flight work are kept
    /// and the error is shown over the current state.
    pub fn select_file(&mut self, candidate: F) -> Result<(), SessionError> {
        match validate_candidate(candidate) {
            Ok(file) => {
                self.generation += 1;
                self.state = SessionState::FileSelected { file };
                Ok(())
            }
            Err(error) => {
                let (base, _) = self.take_parts();
                self.put_parts(base, Some(error.clone()));
                Err(error)
            }
        }
    }

    /// Drop the selection. An error already on screen stays there.
    ///
    /// Results go too: `Empty` has no results panel, so removing the file
    /// after a prediction brings back the bare drop zone rather than
    /// leaving stale results next to it.
    pub fn clear_selection(&mut self) {
        self.generation += 1;
        let (_, overlay) = self.take_parts();
        self.put_parts(SessionState::Empty, overlay);
    }

    /// Move to `Loading` and hand out a ticket for the request.
    ///
    /// Returns `None` without a selection or while a request is in flight.
    pub fn submit_prediction(&mut self) -> Option<PredictionTicket<F>> {
        if self.state.is_loading() {
            return None;
        }
        let file = self.state.selected_file()?.clone();

        self.generation += 1;
        let ticket = PredictionTicket {
            generation: self.generation,
            file: file.handle.clone(),
        };
        self.state = SessionState::Loading { file };
        Some(ticket)
    }

    /// Apply the outcome of a prediction request.
    ///
    /// Returns a preview ticket when results are now on screen; `None` when
    /// the outcome was a failure or the ticket is stale.
    pub fn finish_prediction(
        &mut self,
        ticket: PredictionTicket<F>,
        outcome: Result<Classification, SessionError>,
    ) -> Option<PreviewTicket<F>> {
        if ticket.generation != self.generation || !self.state.is_loading() {
            return None;
        }

        let (base, overlay) = self.take_parts();
        let file = match base {
            SessionState::Loading { file } => file,
            other => {
                self.put_parts(other, overlay);
                return None;
            }
        };

        match outcome {
            Ok(classification) => {
                let results = ResultsView::from(&classification);
                self.put_parts(
                    SessionState::Results {
                        file,
                        results,
                        preview: None,
                    },
                    overlay,
                );
                Some(PreviewTicket {
                    generation: self.generation,
                    file: ticket.file,
                })
            }
            Err(error) => {
                self.put_parts(SessionState::FileSelected { file }, Some(error));
                None
            }
        }
    }

    /// Attach the data URL of the previewed file to the results.
    ///
    /// Returns whether the preview was applied.
    pub fn preview_loaded(&mut self, ticket: PreviewTicket<F>, data_url: String) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let target = match &mut self.state {
            SessionState::Error { underlying, .. } => underlying.as_mut(),
            other => other,
        };
        match target {
            SessionState::Results { preview, .. } => {
                *preview = Some(data_url);
                true
            }
            _ => false,
        }
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::Empty;
    }

    /// Hide the error panel, revealing the state beneath.
    pub fn dismiss_error(&mut self) {
        let (base, _) = self.take_parts();
        self.state = base;
    }

    fn take_parts(&mut self) -> (SessionState<F>, Option<SessionError>) {
        match std::mem::replace(&mut self.state, SessionState::Empty) {
            SessionState::Error { error, underlying } => (*underlying, Some(error)),
            base => (base, None),
        }
    }

    fn put_parts(&mut self, base: SessionState<F>, overlay: Option<SessionError>) {
        self.state = match overlay {
            Some(error) => SessionState::Error {
                error,
                underlying: Box::new(base),
            },
            None => base,
        };
    }
}
