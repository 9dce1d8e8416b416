use std::time::Duration;

use fortune_core::DEFAULT_LLM_TIMEOUT_SECS;

use crate::ai_types::{ChatRequest, ChatResponse};
use crate::error::LlmError;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o";
/// Default OpenAI-compatible endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for chat-completions calls.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) timeout: Duration,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new client with the given API key and base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS);
        Self::build(api_key, base_url, DEFAULT_MODEL.to_owned(), timeout)
    }

    /// Sets a custom model for this client.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Rebuilds the HTTP client with a different request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, LlmError> {
        Self::build(self.api_key, self.base_url, self.model, timeout)
    }

    fn build(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url, model, timeout })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a chat completion request and return the first choice's content.
    ///
    /// A `null` content comes back as an empty string. There is a single
    /// attempt; callers see transport, status and decoding failures directly.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or times out, the API
    /// returns a non-success status, the response body cannot be parsed, or
    /// the choices array is empty.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate(&body, 200),
                "chat completion rejected"
            );
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let first_choice = chat_response.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        Ok(first_choice.message.content.unwrap_or_default())
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
