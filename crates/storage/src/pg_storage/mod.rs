//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by entity.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod messages;
mod profiles;
mod results;
mod sessions;
mod users;

use chrono::{DateTime, Utc};
use fortune_core::{
    FortuneAnalysis, FortuneResult, FortuneType, Gender, Message, MessageRole, Profile, Session,
    User, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;
use crate::error::StorageError;

pub(crate) const USER_COLUMNS: &str =
    "id, email, first_name, last_name, profile_image_url, created_at, updated_at";

pub(crate) const PROFILE_COLUMNS: &str = "id, user_id, birth_date, birth_time, birth_location, \
     gender, preferred_fortune_types, is_setup_complete, created_at, updated_at";

pub(crate) const SESSION_COLUMNS: &str = "id, user_id, fortune_type, title, summary, \
     is_completed, has_user_message, created_at, updated_at";

pub(crate) const MESSAGE_COLUMNS: &str = "id, session_id, role, content, metadata, created_at";

pub(crate) const RESULT_COLUMNS: &str = "id, session_id, fortune_type, overall_score, \
     love_score, wealth_score, health_score, analysis, recommendations, created_at";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    /// Wraps an existing pool without running migrations.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn corrupt(context: &str, err: impl std::error::Error + Send + Sync + 'static) -> StorageError {
    StorageError::DataCorruption { context: context.to_owned(), source: Box::new(err) }
}

pub(crate) fn row_to_user(row: &PgRow) -> Result<User, StorageError> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        profile_image_url: row.try_get("profile_image_url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn row_to_profile(row: &PgRow) -> Result<Profile, StorageError> {
    let gender: String = row.try_get("gender")?;
    let gender: Gender = gender.parse().map_err(|e| corrupt("user_profiles.gender", e))?;
    let preferred: serde_json::Value = row.try_get("preferred_fortune_types")?;
    Ok(Profile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        birth_date: row.try_get("birth_date")?,
        birth_time: row.try_get("birth_time")?,
        birth_location: row.try_get("birth_location")?,
        gender,
        preferred_fortune_types: serde_json::from_value(preferred)?,
        is_setup_complete: row.try_get("is_setup_complete")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn row_to_session(row: &PgRow) -> Result<Session, StorageError> {
    Ok(Session {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        fortune_type: FortuneType::parse(&row.try_get::<String, _>("fortune_type")?),
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        is_completed: row.try_get("is_completed")?,
        has_user_message: row.try_get("has_user_message")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn row_to_message(row: &PgRow) -> Result<Message, StorageError> {
    let role: String = row.try_get("role")?;
    let role: MessageRole = role.parse().map_err(|e| corrupt("fortune_messages.role", e))?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Message {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        role,
        content: row.try_get("content")?,
        metadata: row.try_get("metadata")?,
        created_at,
    })
}

pub(crate) fn row_to_result(row: &PgRow) -> Result<FortuneResult, StorageError> {
    let analysis: serde_json::Value = row.try_get("analysis")?;
    let analysis: FortuneAnalysis = serde_json::from_value(analysis)?;
    Ok(FortuneResult {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        fortune_type: FortuneType::parse(&row.try_get::<String, _>("fortune_type")?),
        overall_score: row.try_get("overall_score")?,
        love_score: row.try_get("love_score")?,
        wealth_score: row.try_get("wealth_score")?,
        health_score: row.try_get("health_score")?,
        analysis,
        recommendations: row.try_get("recommendations")?,
        created_at: row.try_get("created_at")?,
    })
}
