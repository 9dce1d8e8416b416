//! ResultStore implementation for PgStorage.

use super::*;

use crate::traits::ResultStore;
use async_trait::async_trait;
use fortune_core::NewFortuneResult;

#[async_trait]
impl ResultStore for PgStorage {
    async fn create_result(
        &self,
        result: &NewFortuneResult,
    ) -> Result<FortuneResult, StorageError> {
        let analysis = serde_json::to_value(&result.analysis)?;
        let row = sqlx::query(&format!(
            "INSERT INTO fortune_results
               (session_id, fortune_type, overall_score, love_score, wealth_score,
                health_score, analysis, recommendations, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(result.session_id)
        .bind(result.fortune_type.as_str())
        .bind(result.analysis.overall_score)
        .bind(result.analysis.love_score)
        .bind(result.analysis.wealth_score)
        .bind(result.analysis.health_score)
        .bind(analysis)
        .bind(result.analysis.recommendations_text())
        .bind(result.created_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_result(&row)
    }

    async fn get_result(&self, session_id: i64) -> Result<Option<FortuneResult>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {RESULT_COLUMNS} FROM fortune_results WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_result(&r)).transpose()
    }
}
