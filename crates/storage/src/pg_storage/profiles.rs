//! ProfileStore implementation for PgStorage.

use super::*;

use crate::traits::ProfileStore;
use async_trait::async_trait;
use fortune_core::ProfileInput;

#[async_trait]
impl ProfileStore for PgStorage {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StorageError> {
        let row =
            sqlx::query(&format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|r| row_to_profile(&r)).transpose()
    }

    async fn create_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        let preferred = serde_json::to_value(&input.preferred_fortune_types)?;
        let row = sqlx::query(&format!(
            "INSERT INTO user_profiles
               (user_id, birth_date, birth_time, birth_location, gender,
                preferred_fortune_types, is_setup_complete)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.birth_date)
        .bind(&input.birth_time)
        .bind(&input.birth_location)
        .bind(input.gender.as_str())
        .bind(preferred)
        .bind(input.is_setup_complete)
        .fetch_one(&self.pool)
        .await?;
        row_to_profile(&row)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        let preferred = serde_json::to_value(&input.preferred_fortune_types)?;
        let row = sqlx::query(&format!(
            "UPDATE user_profiles SET
               birth_date = $2, birth_time = $3, birth_location = $4, gender = $5,
               preferred_fortune_types = $6, is_setup_complete = $7, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.birth_date)
        .bind(&input.birth_time)
        .bind(&input.birth_location)
        .bind(input.gender.as_str())
        .bind(preferred)
        .bind(input.is_setup_complete)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => row_to_profile(&r),
            None => Err(StorageError::not_found("profile", user_id)),
        }
    }
}
