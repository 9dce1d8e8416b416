use async_trait::async_trait;
use fortune_core::{FortuneResult, NewFortuneResult};

use crate::error::StorageError;

/// Scored analyses, at most one per session.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Insert the result of a session. `Duplicate` if the session already has one.
    async fn create_result(&self, result: &NewFortuneResult)
        -> Result<FortuneResult, StorageError>;

    /// Get the result of a session.
    async fn get_result(&self, session_id: i64) -> Result<Option<FortuneResult>, StorageError>;
}
