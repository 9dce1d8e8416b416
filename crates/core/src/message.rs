use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, FortuneType, GREETING_KIND};

/// Author of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl FromStr for MessageRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(CoreError::InvalidRole(other.to_owned())),
        }
    }
}

/// One turn of a session. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether this is the canned greeting written at session creation.
    #[must_use]
    pub fn is_greeting(&self) -> bool {
        self.metadata.get("kind").and_then(serde_json::Value::as_str) == Some(GREETING_KIND)
    }

    /// Greeting detection for rows written before the `kind` marker existed.
    #[must_use]
    pub fn is_legacy_greeting(&self, fortune_type: &FortuneType) -> bool {
        self.role == MessageRole::Assistant && self.content == fortune_type.greeting()
    }
}

/// Insert payload for a message row.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    #[must_use]
    pub fn user(session_id: i64, content: String) -> Self {
        Self::new(session_id, MessageRole::User, content)
    }

    #[must_use]
    pub fn assistant(session_id: i64, content: String) -> Self {
        Self::new(session_id, MessageRole::Assistant, content)
    }

    /// The opening assistant message for a session, tagged as a greeting.
    #[must_use]
    pub fn greeting(session_id: i64, fortune_type: &FortuneType) -> Self {
        Self {
            metadata: serde_json::json!({ "kind": GREETING_KIND }),
            ..Self::assistant(session_id, fortune_type.greeting().to_owned())
        }
    }

    #[must_use]
    pub fn created_at(self, created_at: DateTime<Utc>) -> Self {
        Self { created_at, ..self }
    }

    fn new(session_id: i64, role: MessageRole, content: String) -> Self {
        Self {
            session_id,
            role,
            content,
            metadata: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }
}
