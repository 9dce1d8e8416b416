//! PostgreSQL schema for the fortune chat service.
//!
//! Every statement is idempotent; the schema is applied on each startup.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE,
            first_name TEXT,
            last_name TEXT,
            profile_image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE REFERENCES users (id),
            birth_date DATE NOT NULL,
            birth_time TEXT,
            birth_location TEXT NOT NULL,
            gender TEXT NOT NULL,
            preferred_fortune_types JSONB NOT NULL DEFAULT '[]',
            is_setup_complete BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fortune_sessions (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users (id),
            fortune_type TEXT NOT NULL,
            title TEXT NOT NULL,
            summary TEXT,
            is_completed BOOLEAN NOT NULL DEFAULT FALSE,
            has_user_message BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_fs_user_created
         ON fortune_sessions (user_id, created_at DESC) WHERE has_user_message",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fortune_messages (
            id BIGSERIAL PRIMARY KEY,
            session_id BIGINT NOT NULL REFERENCES fortune_sessions (id),
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            metadata JSONB NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_fm_session_created
         ON fortune_messages (session_id, created_at, id)",
    )
    .execute(pool)
    .await?;

    // UNIQUE(session_id) is what prevents a second result under concurrent completion
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fortune_results (
            id BIGSERIAL PRIMARY KEY,
            session_id BIGINT NOT NULL UNIQUE REFERENCES fortune_sessions (id),
            fortune_type TEXT NOT NULL,
            overall_score INTEGER NOT NULL,
            love_score INTEGER NOT NULL,
            wealth_score INTEGER NOT NULL,
            health_score INTEGER NOT NULL,
            analysis JSONB NOT NULL,
            recommendations TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("PostgreSQL schema is up to date");
    Ok(())
}
