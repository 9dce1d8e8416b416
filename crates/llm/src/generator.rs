//! The generation seam used by the session orchestrator.

use async_trait::async_trait;
use fortune_core::{FortuneAnalysis, FortuneType, MessageRole, Profile};

use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::analysis::parse_analysis;
use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompts::{analysis_system_prompt, analysis_user_prompt, system_prompt};

/// Sent back to the user when the model returns no text.
pub const REPLY_FALLBACK: &str = "죄송합니다. 응답을 생성할 수 없습니다.";

const REPLY_TEMPERATURE: f32 = 0.7;
const REPLY_MAX_TOKENS: u32 = 1000;
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// One prior turn of a conversation, as sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Produces assistant replies and completion analyses.
#[async_trait]
pub trait FortuneGenerator: Send + Sync {
    /// Next assistant message given prior turns (may be empty) and the new user text.
    async fn reply(
        &self,
        fortune_type: &FortuneType,
        profile: &Profile,
        history: &[ChatTurn],
        user_text: &str,
    ) -> Result<String, LlmError>;

    /// Scored analysis of a finished conversation transcript.
    async fn analyze(
        &self,
        fortune_type: &FortuneType,
        profile: &Profile,
        transcript: &str,
    ) -> Result<FortuneAnalysis, LlmError>;
}

#[async_trait]
impl FortuneGenerator for LlmClient {
    async fn reply(
        &self,
        fortune_type: &FortuneType,
        profile: &Profile,
        history: &[ChatTurn],
        user_text: &str,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(history.len().saturating_add(2));
        messages.push(Message::new("system", system_prompt(fortune_type, profile)));
        messages.extend(
            history.iter().map(|turn| Message::new(turn.role.as_str(), turn.content.clone())),
        );
        messages.push(Message::new("user", user_text));

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            response_format: None,
            temperature: Some(REPLY_TEMPERATURE),
            max_tokens: Some(REPLY_MAX_TOKENS),
        };

        let content = self.chat_completion(&request).await?;
        if content.trim().is_empty() {
            tracing::warn!(fortune_type = %fortune_type, "empty completion, using fallback reply");
            return Ok(REPLY_FALLBACK.to_owned());
        }
        Ok(content)
    }

    async fn analyze(
        &self,
        fortune_type: &FortuneType,
        profile: &Profile,
        transcript: &str,
    ) -> Result<FortuneAnalysis, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::new("system", analysis_system_prompt(fortune_type, profile)),
                Message::new("user", analysis_user_prompt(fortune_type, transcript)),
            ],
            response_format: Some(ResponseFormat::json_object()),
            temperature: Some(ANALYSIS_TEMPERATURE),
            max_tokens: None,
        };

        let content = self.chat_completion(&request).await?;
        let analysis = parse_analysis(fortune_type, &content)?;
        tracing::debug!(
            fortune_type = %fortune_type,
            overall = analysis.overall_score,
            "analysis parsed"
        );
        Ok(analysis)
    }
}
