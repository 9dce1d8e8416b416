use async_trait::async_trait;
use fortune_core::{Message, NewMessage, NewSession, Session};

use crate::error::StorageError;

/// Session rows and their lifecycle flags.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session and return it with its assigned id.
    async fn create_session(&self, session: &NewSession) -> Result<Session, StorageError>;

    /// Get session by ID.
    async fn get_session(&self, id: i64) -> Result<Option<Session>, StorageError>;

    /// Sessions of a user with at least one user message, newest first.
    async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, StorageError>;

    /// Like `list_user_sessions`, restricted to `created_at >= now - hours`.
    async fn recent_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError>;

    /// Like `list_user_sessions`, restricted to `created_at < now - hours`.
    async fn old_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError>;

    /// Set `has_user_message`. Returns `true` only for the call that flipped it.
    async fn mark_user_message(&self, id: i64) -> Result<bool, StorageError>;

    /// Set `is_completed` and the summary. Returns `true` only for the call that
    /// flipped the flag; an already completed session is left untouched.
    async fn complete_session(&self, id: i64, summary: &str) -> Result<bool, StorageError>;
}

/// Append-only conversation turns.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message. `MissingReference` if the session does not exist.
    async fn create_message(&self, message: &NewMessage) -> Result<Message, StorageError>;

    /// All messages of a session ordered by creation time, then id.
    async fn get_session_messages(&self, session_id: i64) -> Result<Vec<Message>, StorageError>;
}
