//! UserStore implementation for PgStorage.

use super::*;

use crate::traits::UserStore;
use async_trait::async_trait;
use fortune_core::UserUpsert;

#[async_trait]
impl UserStore for PgStorage {
    async fn upsert_user(&self, user: &UserUpsert) -> Result<User, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (id, email, first_name, last_name, profile_image_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
               email = COALESCE(EXCLUDED.email, users.email),
               first_name = COALESCE(EXCLUDED.first_name, users.first_name),
               last_name = COALESCE(EXCLUDED.last_name, users.last_name),
               profile_image_url = COALESCE(EXCLUDED.profile_image_url, users.profile_image_url),
               updated_at = NOW()
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_image_url)
        .fetch_one(&self.pool)
        .await?;
        row_to_user(&row)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }
}
