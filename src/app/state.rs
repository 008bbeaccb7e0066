use crate::analysis::{AnalysisError, AnalysisResult, SelectedFile};
use crate::utils::url::resolve_url;
use std::sync::mpsc::Receiver;

pub type AnalysisOutcome = Result<AnalysisResult, AnalysisError>;

#[derive(Debug, Default)]
pub struct AnalysisState {
    pub selected_file: Option<SelectedFile>,
    pub result: Option<AnalysisResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// The error behind `error`, kept for callers that want the full detail.
    pub failure: Option<AnalysisError>,
    pub outcome_receiver: Option<Receiver<AnalysisOutcome>>,
}

/// What the result area shows. Exactly one branch at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Error(String),
    Loading,
    Success(ResultLinks),
    Idle,
}

/// Result URLs resolved against the backend base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLinks {
    pub message: Option<String>,
    pub report_url: String,
    pub radar_chart_url: String,
    pub sentiment_pie_url: String,
}

impl ResultLinks {
    pub fn resolve(result: &AnalysisResult, base_url: &str) -> Self {
        Self {
            message: result.message.clone(),
            report_url: resolve_url(base_url, &result.report_url),
            radar_chart_url: resolve_url(base_url, &result.radar_chart_url),
            sentiment_pie_url: resolve_url(base_url, &result.sentiment_pie_url),
        }
    }
}

impl AnalysisState {
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.error = None;
        self.failure = None;
        self.result = None;
    }

    pub fn reject(&mut self, err: AnalysisError) {
        self.result = None;
        self.fail(err);
    }

    pub fn begin(&mut self, receiver: Receiver<AnalysisOutcome>) {
        self.loading = true;
        self.error = None;
        self.failure = None;
        self.result = None;
        self.outcome_receiver = Some(receiver);
    }

    /// Apply the request's resolution. Sets exactly one of result or error.
    pub fn settle(&mut self, outcome: AnalysisOutcome) {
        self.loading = false;
        self.outcome_receiver = None;

        match outcome {
            Ok(result) => {
                tracing::info!("Analysis finished, report at {}", result.report_url);
                self.result = Some(result);
                self.error = None;
                self.failure = None;
            }
            Err(err) => {
                if err.is_backend_reported() {
                    tracing::info!("Backend rejected the upload: {}", err);
                } else {
                    tracing::warn!("Analysis failed: {}", err);
                }
                self.result = None;
                self.fail(err);
            }
        }
    }

    fn fail(&mut self, err: AnalysisError) {
        self.error = Some(err.user_message());
        self.failure = Some(err);
    }

    pub fn view(&self, base_url: &str) -> View {
        if let Some(error) = &self.error {
            return View::Error(error.clone());
        }
        if self.loading {
            return View::Loading;
        }

        match &self.result {
            Some(result) => View::Success(ResultLinks::resolve(result, base_url)),
            None => View::Idle,
        }
    }

    pub fn status_text(&self) -> String {
        match (&self.selected_file, self.loading) {
            (Some(file), true) => format!("Analyzing {}...", file.name),
            (Some(file), false) => format!("Selected: {}", file.name),
            (None, _) => "No file selected".to_string(),
        }
    }
}
