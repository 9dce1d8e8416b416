use async_trait::async_trait;
use fortune_core::{Profile, ProfileInput, User, UserUpsert};

use crate::error::StorageError;

/// User identity records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user or refresh its identity fields. `None` fields keep the stored value.
    async fn upsert_user(&self, user: &UserUpsert) -> Result<User, StorageError>;

    /// Get user by ID.
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;
}

/// Birth-data profiles, one per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get the profile owned by a user.
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StorageError>;

    /// Create the profile for a user. `Duplicate` if one already exists.
    async fn create_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError>;

    /// Replace the profile fields of a user. `NotFound` if there is no profile.
    async fn update_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError>;
}
