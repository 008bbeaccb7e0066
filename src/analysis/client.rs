use super::error::AnalysisError;
use super::types::{AnalysisResult, ErrorBody, SelectedFile};
use crate::config::BackendConfig;
use crate::utils::url::resolve_url;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Multipart field the backend reads the CSV from.
pub const FILE_FIELD: &str = "file";

/// Anything that can turn a selected CSV into an analysis result.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError>;

    /// Base that relative result paths are resolved against.
    fn base_url(&self) -> &str;
}

/// HTTP client for the review analysis service.
#[derive(Clone)]
pub struct AnalyzeClient {
    client: Client,
    base_url: String,
}

impl AnalyzeClient {
    pub fn new(config: &BackendConfig) -> Result<Self, AnalysisError> {
        // Each request runs on its own short-lived runtime, so pooled
        // connections would outlive the runtime that owns them.
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    pub fn resolve(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    /// Fetch a generated artifact, e.g. the report document.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, AnalysisError> {
        tracing::debug!("Downloading {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Backend {
                status: status.as_u16(),
                message: None,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl AnalysisBackend for AnalyzeClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        let content = tokio::fs::read(file.path())
            .await
            .map_err(|source| AnalysisError::ReadFile {
                path: file.path.clone(),
                source,
            })?;

        tracing::info!(
            "Uploading '{}' ({} bytes) to {}",
            file.name,
            content.len(),
            self.analyze_url()
        );

        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(self.analyze_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("Analyze responded with {} ({} bytes)", status, body.len());

        parse_response(status, &body)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn parse_response(status: StatusCode, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    if status.is_success() {
        return Ok(serde_json::from_slice(body)?);
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty());

    Err(AnalysisError::Backend {
        status: status.as_u16(),
        message,
    })
}
