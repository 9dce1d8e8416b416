//! Test utilities and module declarations for storage tests.

use crate::traits::{SessionStore, UserStore};
use crate::MemoryStorage;
use chrono::{DateTime, Utc};
use fortune_core::{
    FortuneAnalysis, FortuneType, NewSession, ProfileInput, Session, UserUpsert,
};

mod identity_tests;

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn storage_with_user(user_id: &str) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.upsert_user(&UserUpsert::new(user_id)).await.unwrap();
    storage
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn session_at(
    storage: &MemoryStorage,
    user_id: &str,
    created_at: DateTime<Utc>,
    has_user_message: bool,
) -> Session {
    let mut new = NewSession::new(user_id.to_owned(), FortuneType::Tarot, "타로 상담".to_owned())
        .created_at(created_at);
    new.has_user_message = has_user_message;
    storage.create_session(&new).await.unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn profile_input(location: &str) -> ProfileInput {
    ProfileInput::parse(Some("1990-05-17"), Some("07:30"), Some(location), Some("female"), vec![])
        .unwrap()
}

pub fn analysis(overall: i32) -> FortuneAnalysis {
    FortuneAnalysis {
        overall_score: overall,
        love_score: 70,
        wealth_score: 65,
        health_score: 80,
        personality: "성실함".to_owned(),
        love_life: "안정적".to_owned(),
        wealth: "꾸준함".to_owned(),
        health: "양호".to_owned(),
        recommendations: vec!["규칙적인 생활".to_owned()],
        five_elements: None,
        saju_pillars: None,
        tarot_cards: Some(vec!["The Star".to_owned()]),
        zodiac_sign: None,
    }
}
