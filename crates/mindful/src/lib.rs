//! Reflection and goal journal backed by the Gemini `generateContent` API.
//!
//! `mindful` turns a free-text reflection or goal into a prompt, sends it to
//! the remote model, formats the reply into display markup, and keeps a
//! newest-first journal of every successful exchange in durable storage.
//!
//! # Getting started
//!
//! ```ignore
//! use mindful::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let config = JournalConfig::from_env();
//!     let api_key = config.require_api_key().map_err(|e| e.to_string())?;
//!     let client = GeminiClient::new(api_key, &config.generate_url()).map_err(|e| e.to_string())?;
//!
//!     let store = EntryStore::load(
//!         Box::new(FileStorage::new(&config.data_dir)),
//!         Box::new(NoView),
//!     )
//!     .map_err(|e| e.to_string())?;
//!
//!     let journal = Journal::new(Box::new(client), store);
//!     match journal.reflect("Finished the long run I'd been putting off.").await {
//!         Ok(ActionOutcome::Saved(entry)) => println!("{}", entry.insights),
//!         Ok(ActionOutcome::Failed) => eprintln!("{REFLECTION_APOLOGY}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | Reflection and goal prompt builders, [`Timeframe`](prompt::Timeframe) codes |
//! | [`format`] | The Markdown-subset to HTML formatter applied to every response |
//! | [`journal`] | [`Entry`](journal::Entry), [`EntryStore`](journal::EntryStore), storage backends, markup rendering |
//! | [`ui`] | Panel/control state and the two action handlers, bundled in [`Journal`](ui::Journal) |
//! | [`config`] | [`JournalConfig`](config::JournalConfig) resolved from the environment |

pub mod config;
pub mod format;
pub mod journal;
pub mod prelude;
pub mod prompt;
pub mod ui;

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tracing::{debug, trace};

// ── Constants ──────────────────────────────────────────────────────

/// Base URL of the Gemini model collection.
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for all generation calls.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Returned in place of the completion text when the response carries none.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "Received empty response from the API";

/// JSON pointer to the first candidate's first text part.
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

// ── Request types ──────────────────────────────────────────────────

/// `generateContent` request body: one content entry with one text part.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

impl GenerateRequest {
    /// Wrap a single prompt in the envelope the API expects.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Failure of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The API answered with a non-success HTTP status.
    #[error("API request failed")]
    RequestFailed,
    /// The request never produced a response (DNS, connection, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A success response whose body is not JSON.
    #[error("failed to parse response: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),
}

// ── Generator seam ─────────────────────────────────────────────────

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GenerateError>> + Send + 'a>>;

/// Anything that can turn one prompt into one completion text.
///
/// [`GeminiClient`] is the production implementation; the action handlers
/// only see this trait.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Gemini `generateContent` endpoint.
///
/// Sends exactly one request per call. There is no timeout and no retry:
/// each call resolves or fails once.
pub struct GeminiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) url: reqwest::Url,
}

impl GeminiClient {
    /// Create a client for the full `...:generateContent` URL.
    pub fn new(api_key: impl Into<String>, url: &str) -> Result<Self, GenerateError> {
        let url =
            reqwest::Url::parse(url).map_err(|_| GenerateError::InvalidEndpoint(url.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("mindful/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            url,
        })
    }

    /// Create a client for the default model on the public endpoint.
    pub fn with_default_model(api_key: impl Into<String>) -> Result<Self, GenerateError> {
        Self::new(
            api_key,
            &format!("{GEMINI_ENDPOINT}/{DEFAULT_MODEL}:generateContent"),
        )
    }

    /// Send one prompt and return the first candidate's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = GenerateRequest::from_prompt(prompt);
        debug!(
            "Generate request: {}{} ({} chars prompt)",
            self.url.host_str().unwrap_or("(no host)"),
            self.url.path(),
            prompt.len()
        );

        // The key travels as a query parameter; keep it out of the logged URL.
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let start = Instant::now();
        let resp = self.client.post(url).json(&body).send().await?;
        let status = resp.status();

        // A failed status is final; the error body is only traced.
        if !status.is_success() {
            debug!(
                "Generate response: HTTP {} in {:.1}s",
                status,
                start.elapsed().as_secs_f64()
            );
            if let Ok(text) = resp.text().await {
                trace!("Error body: {text}");
            }
            return Err(GenerateError::RequestFailed);
        }

        let text = resp.text().await?;
        debug!(
            "Generate response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        let parsed: serde_json::Value = serde_json::from_str(&text)?;
        Ok(extract_text(&parsed))
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_content(prompt))
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
///
/// Any other shape (missing path, non-string, empty string) degrades to
/// [`EMPTY_RESPONSE_PLACEHOLDER`].
pub fn extract_text(body: &serde_json::Value) -> String {
    body.pointer(TEXT_POINTER)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map_or_else(|| EMPTY_RESPONSE_PLACEHOLDER.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_has_single_text_part() {
        let req = GenerateRequest::from_prompt("hello");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        });
        assert_eq!(extract_text(&body), "first");
    }

    #[test]
    fn extract_text_degrades_to_placeholder() {
        let shapes = [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": 42}]}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
        ];
        for body in shapes {
            assert_eq!(extract_text(&body), EMPTY_RESPONSE_PLACEHOLDER, "{body}");
        }
    }

    #[test]
    fn new_rejects_malformed_url() {
        let err = GeminiClient::new("k", "not a url").err().unwrap();
        assert!(matches!(err, GenerateError::InvalidEndpoint(_)));
    }

    #[test]
    fn default_model_url() {
        let client = GeminiClient::with_default_model("k").unwrap();
        assert_eq!(
            client.url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
