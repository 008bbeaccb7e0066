mod client;
mod error;
mod types;

pub use client::{AnalysisBackend, AnalyzeClient, FILE_FIELD};
pub use error::{AnalysisError, FALLBACK_MESSAGE, NO_FILE_MESSAGE};
pub use types::{AnalysisResult, SelectedFile};
