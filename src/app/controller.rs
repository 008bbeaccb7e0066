use super::state::{AnalysisOutcome, AnalysisState, View};
use crate::analysis::{AnalysisBackend, AnalysisError, AnalysisResult, SelectedFile};
use derivative::Derivative;
use std::sync::mpsc::{self as std_mpsc, TryRecvError};
use std::sync::Arc;

/// Drives the select / analyze / display lifecycle.
///
/// At most one analyze request is in flight. Its outcome comes back over a
/// channel that `poll` drains on the UI thread, so every state change happens
/// on the caller's thread.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct AnalysisController {
    #[derivative(Debug = "ignore")]
    backend: Arc<dyn AnalysisBackend>,
    state: AnalysisState,
}

impl AnalysisController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: AnalysisState::default(),
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.state.selected_file.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The error behind the current banner message.
    pub fn failure(&self) -> Option<&AnalysisError> {
        self.state.failure.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url()
    }

    pub fn view(&self) -> View {
        self.state.view(self.backend.base_url())
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        tracing::info!("Selected file: {}", file.path.display());
        self.state.select_file(file);
    }

    pub fn analyze(&mut self) {
        if self.state.loading {
            tracing::warn!("Analysis already running, ignoring request");
            return;
        }

        let Some(file) = self.state.selected_file.clone() else {
            tracing::debug!("Analyze requested without a file");
            self.state.reject(AnalysisError::NoFileSelected);
            return;
        };

        let (sender, receiver) = std_mpsc::channel();
        self.state.begin(receiver);

        let backend = Arc::clone(&self.backend);
        tracing::info!("Starting analysis of {}", file.name);

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(backend.analyze(&file)),
                Err(e) => Err(AnalysisError::Runtime(e)),
            };

            // The controller may be gone already; nothing to report to then.
            let _ = sender.send(outcome);
        });
    }

    /// Apply a finished request, if any. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.state.outcome_receiver else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(AnalysisError::WorkerGone),
        };

        self.state.settle(outcome);
        true
    }

    /// Block until the in-flight request settles. No-op when idle.
    pub fn wait(&mut self) {
        let Some(receiver) = &self.state.outcome_receiver else {
            return;
        };

        let outcome: AnalysisOutcome = receiver
            .recv()
            .unwrap_or_else(|_| Err(AnalysisError::WorkerGone));
        self.state.settle(outcome);
    }
}
