//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p fortune-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use chrono::{Duration, Utc};
use fortune_core::{
    FortuneAnalysis, FortuneType, NewFortuneResult, NewMessage, NewSession, ProfileInput,
    UserUpsert,
};
use fortune_storage::traits::{
    MessageStore, ProfileStore, ResultStore, SessionStore, UserStore,
};
use fortune_storage::PgStorage;
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

async fn fresh_user(storage: &PgStorage) -> String {
    let id = format!("test-{}", Uuid::new_v4());
    storage.upsert_user(&UserUpsert::new(id.clone())).await.unwrap();
    id
}

fn analysis() -> FortuneAnalysis {
    FortuneAnalysis {
        overall_score: 77,
        love_score: 81,
        wealth_score: 64,
        health_score: 90,
        personality: "따뜻함".to_owned(),
        love_life: "설렘".to_owned(),
        wealth: "안정".to_owned(),
        health: "활력".to_owned(),
        recommendations: vec!["물 많이 마시기".to_owned()],
        five_elements: None,
        saju_pillars: None,
        tarot_cards: None,
        zodiac_sign: Some("쌍둥이자리".to_owned()),
    }
}

#[tokio::test]
#[ignore]
async fn pg_user_upsert_coalesces() {
    let storage = create_pg_storage().await;
    let id = fresh_user(&storage).await;

    storage
        .upsert_user(&UserUpsert { first_name: Some("지수".to_owned()), ..UserUpsert::new(&*id) })
        .await
        .unwrap();
    let user = storage
        .upsert_user(&UserUpsert { last_name: Some("박".to_owned()), ..UserUpsert::new(&*id) })
        .await
        .unwrap();

    assert_eq!(user.first_name.as_deref(), Some("지수"));
    assert_eq!(user.last_name.as_deref(), Some("박"));
}

#[tokio::test]
#[ignore]
async fn pg_profile_roundtrip() {
    let storage = create_pg_storage().await;
    let id = fresh_user(&storage).await;
    let input = ProfileInput::parse(
        Some("1992-03-04"),
        None,
        Some("인천"),
        Some("male"),
        vec!["saju".to_owned(), "tarot".to_owned()],
    )
    .unwrap();

    let created = storage.create_profile(&id, &input).await.unwrap();
    let fetched = storage.get_profile(&id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.preferred_fortune_types, vec!["saju", "tarot"]);
    assert!(storage.create_profile(&id, &input).await.unwrap_err().is_duplicate());
}

#[tokio::test]
#[ignore]
async fn pg_session_lifecycle_and_windows() {
    let storage = create_pg_storage().await;
    let user = fresh_user(&storage).await;

    let session = storage
        .create_session(&NewSession::new(user.clone(), FortuneType::Astrology, "별자리".to_owned()))
        .await
        .unwrap();
    storage
        .create_message(&NewMessage::greeting(session.id, &FortuneType::Astrology))
        .await
        .unwrap();
    assert!(storage.recent_user_sessions(&user, 24).await.unwrap().is_empty());

    storage.create_message(&NewMessage::user(session.id, "안녕".to_owned())).await.unwrap();
    assert!(storage.mark_user_message(session.id).await.unwrap());
    assert!(!storage.mark_user_message(session.id).await.unwrap());

    let old = storage
        .create_session(
            &NewSession::new(user.clone(), FortuneType::Casual, "옛날".to_owned())
                .created_at(Utc::now() - Duration::days(3))
                .finished("이야기 - 좋은 시간이었어요".to_owned()),
        )
        .await
        .unwrap();

    let recent = storage.recent_user_sessions(&user, 24).await.unwrap();
    let older = storage.old_user_sessions(&user, 24).await.unwrap();
    assert_eq!(recent.iter().map(|s| s.id).collect::<Vec<_>>(), vec![session.id]);
    assert_eq!(older.iter().map(|s| s.id).collect::<Vec<_>>(), vec![old.id]);

    let messages = storage.get_session_messages(session.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_greeting());

    assert!(storage.complete_session(session.id, "별자리 이야기 - 종합 77점").await.unwrap());
    assert!(!storage.complete_session(session.id, "again").await.unwrap());
}

#[tokio::test]
#[ignore]
async fn pg_result_unique_per_session() {
    let storage = create_pg_storage().await;
    let user = fresh_user(&storage).await;
    let session = storage
        .create_session(&NewSession::new(user, FortuneType::Astrology, "별자리".to_owned()))
        .await
        .unwrap();
    let new = NewFortuneResult::new(session.id, FortuneType::Astrology, analysis());

    let created = storage.create_result(&new).await.unwrap();
    assert_eq!(created.analysis.zodiac_sign.as_deref(), Some("쌍둥이자리"));
    assert!(storage.create_result(&new).await.unwrap_err().is_duplicate());
    assert_eq!(storage.get_result(session.id).await.unwrap(), Some(created));
}
