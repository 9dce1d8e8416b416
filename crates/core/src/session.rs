use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::FortuneType;

/// One divination conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub user_id: String,
    pub fortune_type: FortuneType,
    pub title: String,
    pub summary: Option<String>,
    pub is_completed: bool,
    pub has_user_message: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle position of a session. Transitions only move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Greeting sent, no user message yet
    Created,
    /// At least one user message, not completed
    Active,
    /// Terminal
    Completed,
}

impl Session {
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.is_completed {
            SessionState::Completed
        } else if self.has_user_message {
            SessionState::Active
        } else {
            SessionState::Created
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Insert payload for a session row.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: String,
    pub fortune_type: FortuneType,
    pub title: String,
    pub summary: Option<String>,
    pub is_completed: bool,
    pub has_user_message: bool,
    pub created_at: DateTime<Utc>,
}

impl NewSession {
    /// A fresh session in the `Created` state.
    #[must_use]
    pub fn new(user_id: String, fortune_type: FortuneType, title: String) -> Self {
        Self {
            user_id,
            fortune_type,
            title,
            summary: None,
            is_completed: false,
            has_user_message: false,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn created_at(self, created_at: DateTime<Utc>) -> Self {
        Self { created_at, ..self }
    }

    /// Marks the row as an already finished conversation (used when seeding history).
    #[must_use]
    pub fn finished(self, summary: String) -> Self {
        Self { summary: Some(summary), is_completed: true, has_user_message: true, ..self }
    }
}
