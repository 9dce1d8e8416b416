//! SessionStore implementation for PgStorage.

use super::*;

use crate::traits::SessionStore;
use async_trait::async_trait;
use chrono::Duration;
use fortune_core::NewSession;

#[async_trait]
impl SessionStore for PgStorage {
    async fn create_session(&self, session: &NewSession) -> Result<Session, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO fortune_sessions
               (user_id, fortune_type, title, summary, is_completed, has_user_message,
                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(&session.user_id)
        .bind(session.fortune_type.as_str())
        .bind(&session.title)
        .bind(&session.summary)
        .bind(session.is_completed)
        .bind(session.has_user_message)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_session(&row)
    }

    async fn get_session(&self, id: i64) -> Result<Option<Session>, StorageError> {
        let row =
            sqlx::query(&format!("SELECT {SESSION_COLUMNS} FROM fortune_sessions WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|r| row_to_session(&r)).transpose()
    }

    async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM fortune_sessions
             WHERE user_id = $1 AND has_user_message = TRUE
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_session).collect()
    }

    async fn recent_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM fortune_sessions
             WHERE user_id = $1 AND has_user_message = TRUE AND created_at >= $2
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_session).collect()
    }

    async fn old_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM fortune_sessions
             WHERE user_id = $1 AND has_user_message = TRUE AND created_at < $2
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_session).collect()
    }

    async fn mark_user_message(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE fortune_sessions SET has_user_message = TRUE, updated_at = NOW()
             WHERE id = $1 AND has_user_message = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn complete_session(&self, id: i64, summary: &str) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE fortune_sessions SET is_completed = TRUE, summary = $2, updated_at = NOW()
             WHERE id = $1 AND is_completed = FALSE",
        )
        .bind(id)
        .bind(summary)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
