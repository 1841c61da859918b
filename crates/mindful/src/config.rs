//! Runtime configuration with sensible defaults.
//!
//! [`JournalConfig`] is resolved from environment variables and then
//! overridden by command-line flags in the binaries.

use std::path::PathBuf;

use crate::{DEFAULT_MODEL, GEMINI_ENDPOINT};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "MINDFUL_MODEL";
pub const ENV_ENDPOINT: &str = "MINDFUL_ENDPOINT";
pub const ENV_DATA_DIR: &str = "MINDFUL_DATA_DIR";

/// Default directory for the stored journal and the rendered page.
pub const DEFAULT_DATA_DIR: &str = "mindful-data";

/// File name of the HTML page kept in sync with the journal.
pub const JOURNAL_PAGE: &str = "journal.html";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,
}

/// Settings shared by the CLI and the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// Gemini API key. Default: empty (must be provided).
    pub api_key: String,
    /// Model identifier. Default: `"gemini-1.5-flash"`.
    pub model: String,
    /// Base URL of the model collection. Default: the public v1beta endpoint.
    pub endpoint: String,
    /// Where the journal is stored. Default: `"mindful-data"`.
    pub data_dir: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: GEMINI_ENDPOINT.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl JournalConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();
        if let Some(key) = get(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// The API key, or an error if none was configured.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            Err(ConfigError::MissingApiKey)
        } else {
            Ok(key)
        }
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    pub fn page_path(&self) -> PathBuf {
        self.data_dir.join(JOURNAL_PAGE)
    }
}
