use std::path::PathBuf;
use thiserror::Error;

pub const NO_FILE_MESSAGE: &str = "please select a CSV file first";
pub const FALLBACK_MESSAGE: &str = "analysis failed, please check the backend service";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend returned {status}: {}", message.as_deref().unwrap_or("<no error message>"))]
    Backend { status: u16, message: Option<String> },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("analysis worker exited without reporting")]
    WorkerGone,
}

impl AnalysisError {
    /// Text shown in the error banner.
    ///
    /// Only a message reported by the backend is shown verbatim; every
    /// transport-level failure collapses into the fallback text.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFileSelected => NO_FILE_MESSAGE.to_string(),
            Self::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_backend_reported(&self) -> bool {
        matches!(self, Self::Backend { message: Some(_), .. })
    }
}
