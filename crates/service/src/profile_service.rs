use std::sync::Arc;

use fortune_core::{Profile, ProfileInput, User, UserUpsert};
use fortune_storage::StorageBackend;
use fortune_storage::traits::{ProfileStore, UserStore};
use serde::Serialize;

use crate::error::ServiceError;

/// A user together with their profile, if one has been set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
}

pub struct ProfileService {
    storage: Arc<StorageBackend>,
}

impl ProfileService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Inserts the user or refreshes the identity fields that were supplied.
    pub async fn upsert_user(&self, user: &UserUpsert) -> Result<User, ServiceError> {
        if user.id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("user id must not be empty".to_owned()));
        }
        let stored = self.storage.upsert_user(user).await?;
        tracing::debug!(user_id = %stored.id, "user upserted");
        Ok(stored)
    }

    pub async fn get_user_with_profile(
        &self,
        user_id: &str,
    ) -> Result<UserWithProfile, ServiceError> {
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))?;
        let profile = self.storage.get_profile(user_id).await?;
        Ok(UserWithProfile { user, profile })
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, ServiceError> {
        self.storage
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile", user_id))
    }

    /// Creates the profile on first save and overwrites it afterwards.
    pub async fn save_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, ServiceError> {
        if self.storage.get_user(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }
        let profile = if self.storage.get_profile(user_id).await?.is_some() {
            self.storage.update_profile(user_id, input).await?
        } else {
            match self.storage.create_profile(user_id, input).await {
                Ok(profile) => profile,
                // lost a race with a concurrent first save
                Err(e) if e.is_duplicate() => self.storage.update_profile(user_id, input).await?,
                Err(e) => return Err(e.into()),
            }
        };
        tracing::info!(user_id, "profile saved");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(StorageBackend::new_memory()))
    }

    fn input(location: &str) -> ProfileInput {
        ProfileInput::parse(Some("1993-10-09"), None, Some(location), Some("male"), vec![]).unwrap()
    }

    #[tokio::test]
    async fn user_without_profile_reports_none() {
        let svc = service();
        svc.upsert_user(&UserUpsert::new("u1")).await.unwrap();

        let view = svc.get_user_with_profile("u1").await.unwrap();
        assert_eq!(view.user.id, "u1");
        assert!(view.profile.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "u1");
        assert!(json["profile"].is_null());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let svc = service();
        assert!(svc.get_user_with_profile("ghost").await.unwrap_err().is_not_found());
        assert!(svc.save_profile("ghost", &input("서울")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn blank_user_id_is_rejected() {
        let err = service().upsert_user(&UserUpsert::new("  ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn save_profile_creates_then_updates() {
        let svc = service();
        svc.upsert_user(&UserUpsert::new("u1")).await.unwrap();
        assert!(svc.get_profile("u1").await.unwrap_err().is_not_found());

        let first = svc.save_profile("u1", &input("서울")).await.unwrap();
        let second = svc.save_profile("u1", &input("광주")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.is_setup_complete);
        assert_eq!(svc.get_profile("u1").await.unwrap().birth_location, "광주");
    }
}
