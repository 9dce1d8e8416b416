//! MessageStore implementation for PgStorage.

use super::*;

use crate::traits::MessageStore;
use async_trait::async_trait;
use fortune_core::NewMessage;

#[async_trait]
impl MessageStore for PgStorage {
    async fn create_message(&self, message: &NewMessage) -> Result<Message, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO fortune_messages (session_id, role, content, metadata, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(message.session_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(&message.metadata)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_message(&row)
    }

    async fn get_session_messages(&self, session_id: i64) -> Result<Vec<Message>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM fortune_messages
             WHERE session_id = $1
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_message).collect()
    }
}
