//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from generation requests.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("invalid analysis: {0}")]
    InvalidAnalysis(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl LlmError {
    /// Whether the request ran into the client timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::HttpRequest(e) if e.is_timeout())
    }

    /// Whether the provider rejected or failed the request on its side.
    #[must_use]
    pub const fn is_upstream_status(&self) -> bool {
        matches!(self, Self::HttpStatus { .. })
    }
}
