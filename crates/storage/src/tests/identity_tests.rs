use super::{profile_input, storage_with_user};
use crate::traits::{ProfileStore, UserStore};
use crate::{MemoryStorage, StorageError};
use fortune_core::UserUpsert;

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn upsert_keeps_fields_the_refresh_leaves_out() {
    let storage = MemoryStorage::new();
    let first = storage
        .upsert_user(&UserUpsert {
            email: Some("min@example.com".to_owned()),
            first_name: Some("민".to_owned()),
            ..UserUpsert::new("u1")
        })
        .await
        .unwrap();

    let refreshed = storage
        .upsert_user(&UserUpsert { last_name: Some("김".to_owned()), ..UserUpsert::new("u1") })
        .await
        .unwrap();

    assert_eq!(refreshed.email.as_deref(), Some("min@example.com"));
    assert_eq!(refreshed.first_name.as_deref(), Some("민"));
    assert_eq!(refreshed.last_name.as_deref(), Some("김"));
    assert_eq!(refreshed.created_at, first.created_at);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn email_is_unique_across_users() {
    let storage = MemoryStorage::new();
    let with_email =
        |id: &str| UserUpsert { email: Some("same@example.com".to_owned()), ..UserUpsert::new(id) };
    storage.upsert_user(&with_email("u1")).await.unwrap();

    let err = storage.upsert_user(&with_email("u2")).await.unwrap_err();
    assert!(err.is_duplicate());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn profile_create_then_update() {
    let storage = storage_with_user("u1").await;
    assert!(storage.get_profile("u1").await.unwrap().is_none());

    let created = storage.create_profile("u1", &profile_input("서울")).await.unwrap();
    assert!(created.is_setup_complete);
    assert_eq!(created.birth_time.as_deref(), Some("07:30"));

    let updated = storage.update_profile("u1", &profile_input("부산")).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.birth_location, "부산");
    assert_eq!(storage.get_profile("u1").await.unwrap(), Some(updated));
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn second_profile_for_user_is_duplicate() {
    let storage = storage_with_user("u1").await;
    storage.create_profile("u1", &profile_input("서울")).await.unwrap();
    let err = storage.create_profile("u1", &profile_input("대구")).await.unwrap_err();
    assert!(err.is_duplicate());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn updating_absent_profile_is_not_found() {
    let storage = storage_with_user("u1").await;
    let err = storage.update_profile("u1", &profile_input("서울")).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "profile", .. }));
}
