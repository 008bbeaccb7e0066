use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A review CSV picked by the user. Content is never inspected client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: Option<u64>,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = fs::metadata(&path).ok().map(|meta| meta.len());

        Self { path, name, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Successful response of `POST /analyze`.
///
/// All three URLs are required; a body missing one of them fails to decode,
/// so a result is either complete or absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResult {
    pub report_url: String,
    pub radar_chart_url: String,
    pub sentiment_pie_url: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
