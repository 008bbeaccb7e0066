//! Configuration
//!
//! Loaded from a TOML file with environment variable overrides. Every section
//! falls back to defaults, so an empty file is a valid config.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "REVIEW_DASHBOARD_BASE_URL";
pub const LOG_LEVEL_ENV: &str = "REVIEW_DASHBOARD_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "REVIEW_DASHBOARD_LOG_FORMAT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

/// Analysis service connection
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means the request waits as long as the transport does.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    960.0
}

fn default_height() -> f32 {
    900.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// First existing config file among the default locations.
    pub fn locate() -> Option<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("review-dashboard").join("config.toml")),
            Some(PathBuf::from("./review-dashboard.toml")),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Command line `--base-url`, applied last so it beats file and env.
    pub fn override_base_url(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url {
            self.backend.base_url = url;
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.backend.base_url = url;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).as_deref().and_then(LogFormat::parse) {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Commented template printed by `review-dashboard config`.
pub fn generate_default_config() -> String {
    r#"# Review Dashboard configuration
#
# Environment variables override these settings:
# - REVIEW_DASHBOARD_BASE_URL
# - REVIEW_DASHBOARD_LOG_LEVEL
# - REVIEW_DASHBOARD_LOG_FORMAT

[backend]
# Analysis service; result paths are resolved against this URL
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds (unset: wait for the transport)
# request_timeout_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"

[window]
width = 960.0
height = 900.0
"#
    .to_string()
}
