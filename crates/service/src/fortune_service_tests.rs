use chrono::{Duration, Utc};
use fortune_core::{FortuneAnalysis, MessageRole, ProfileInput};

use super::*;
use crate::test_support::{ScriptedGenerator, analysis_for, harness, harness_with};

#[tokio::test]
async fn start_writes_session_and_single_greeting_for_every_type() {
    let h = harness().await;
    for (raw, expected) in [
        ("saju", FortuneType::Saju),
        ("tarot", FortuneType::Tarot),
        ("astrology", FortuneType::Astrology),
        ("casual", FortuneType::Casual),
    ] {
        let session = h.service.start("u1", raw, "제목").await.unwrap();
        assert_eq!(session.fortune_type, expected);
        assert!(!session.is_completed);
        assert!(!session.has_user_message);

        let messages = h.storage.get_session_messages(session.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert_eq!(messages[0].content, expected.greeting());
        assert!(messages[0].is_greeting());
    }
}

#[tokio::test]
async fn start_rejects_blank_fields_and_unknown_user() {
    let h = harness().await;
    let err = h.service.start("u1", "  ", "제목").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    let err = h.service.start("u1", "saju", "").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    let err = h.service.start("ghost", "saju", "제목").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unknown_type_is_kept_verbatim() {
    let h = harness().await;
    let session = h.service.start("u1", "numerology", "숫자").await.unwrap();
    assert_eq!(session.fortune_type, FortuneType::Other("numerology".to_owned()));
}

#[tokio::test]
async fn first_message_flips_has_user_message_and_stores_reply() {
    let h = harness().await;
    let session = h.service.start("u1", "tarot", "타로").await.unwrap();

    let reply = h.service.send_message(session.id, "오늘 어때요?", "u1").await.unwrap();
    assert_eq!(reply.role, MessageRole::Assistant);
    assert_eq!(reply.content, "tarot 답변: 오늘 어때요?");

    let stored = h.storage.get_session(session.id).await.unwrap().unwrap();
    assert!(stored.has_user_message);

    h.service.send_message(session.id, "한 번 더", "u1").await.unwrap();
    let messages = h.storage.get_session_messages(session.id).await.unwrap();
    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
        ]
    );
}

#[tokio::test]
async fn history_excludes_greetings_and_the_new_message() {
    let h = harness().await;
    let session = h.service.start("u1", "saju", "사주").await.unwrap();
    // row from before greetings were tagged
    h.storage
        .create_message(&NewMessage::assistant(session.id, FortuneType::Saju.greeting().to_owned()))
        .await
        .unwrap();

    h.service.send_message(session.id, "첫 질문", "u1").await.unwrap();
    h.service.send_message(session.id, "두 번째 질문", "u1").await.unwrap();

    let calls = h.generator.reply_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].history.is_empty());
    assert_eq!(calls[0].user_text, "첫 질문");

    let second = &calls[1];
    assert_eq!(second.fortune_type, FortuneType::Saju);
    assert_eq!(
        second.history,
        vec![
            ChatTurn::new(MessageRole::User, "첫 질문"),
            ChatTurn::new(MessageRole::Assistant, "saju 답변: 첫 질문"),
        ]
    );
}

#[tokio::test]
async fn send_message_guards() {
    let h = harness().await;
    let session = h.service.start("u1", "saju", "사주").await.unwrap();

    let err = h.service.send_message(session.id, "   ", "u1").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = h.service.send_message(session.id, "안녕", "u2").await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = h.service.send_message(9999, "안녕", "u1").await.unwrap_err();
    assert!(err.is_not_found());

    h.service.complete_session(session.id, "u1").await.unwrap();
    let err = h.service.send_message(session.id, "안녕", "u1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    assert!(h.generator.reply_calls().is_empty());
}

#[tokio::test]
async fn send_message_requires_completed_profile() {
    let h = harness().await;
    let session = h.service.start("u2", "casual", "대화").await.unwrap();
    let err = h.service.send_message(session.id, "안녕", "u2").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "profile", .. }));

    let mut draft =
        ProfileInput::parse(Some("2000-01-01"), None, Some("부산"), Some("male"), vec![]).unwrap();
    draft.is_setup_complete = false;
    h.storage.create_profile("u2", &draft).await.unwrap();
    let err = h.service.send_message(session.id, "안녕", "u2").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "profile", .. }));
}

#[tokio::test]
async fn generation_failure_keeps_user_message() {
    let h = harness_with(ScriptedGenerator::failing()).await;
    let session = h.service.start("u1", "astrology", "별자리").await.unwrap();

    let err = h.service.send_message(session.id, "이번 달은요?", "u1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Generation(_)));

    let messages = h.storage.get_session_messages(session.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::User);
    assert!(h.storage.get_session(session.id).await.unwrap().unwrap().has_user_message);
}

#[tokio::test]
async fn casual_completion_has_fixed_summary_and_no_result() {
    let h = harness().await;
    let session = h.service.start("u1", "casual", "대화").await.unwrap();
    h.service.send_message(session.id, "심심해요", "u1").await.unwrap();

    let outcome = h.service.complete_session(session.id, "u1").await.unwrap();
    assert_eq!(outcome.summary, CASUAL_SUMMARY);
    assert!(outcome.result.is_none());
    assert!(!outcome.already_completed);
    assert!(h.generator.analyze_calls().is_empty());

    let stored = h.storage.get_session(session.id).await.unwrap().unwrap();
    assert!(stored.is_completed);
    assert_eq!(stored.summary.as_deref(), Some(CASUAL_SUMMARY));
    assert!(h.storage.get_result(session.id).await.unwrap().is_none());
}

#[tokio::test]
async fn tarot_completion_stores_result_and_scored_summary() {
    let h = harness().await;
    let session = h.service.start("u1", "tarot", "타로").await.unwrap();
    h.service.send_message(session.id, "카드 뽑아주세요", "u1").await.unwrap();

    let outcome = h.service.complete_session(session.id, "u1").await.unwrap();
    assert_eq!(outcome.summary, "타로 이야기 - 종합 84점");
    let result = outcome.result.unwrap();
    assert_eq!(result.overall_score, 84);
    assert_eq!(result.recommendations.as_deref(), Some("아침 산책\n감사 일기"));

    let transcripts = h.generator.analyze_calls();
    assert_eq!(transcripts.len(), 1);
    assert!(transcripts[0].contains("user: 카드 뽑아주세요"));
    assert!(transcripts[0].contains(&format!("assistant: {}", FortuneType::Tarot.greeting())));
}

#[tokio::test]
async fn unknown_type_completion_uses_generic_label() {
    let h = harness().await;
    let session = h.service.start("u1", "numerology", "숫자").await.unwrap();
    let outcome = h.service.complete_session(session.id, "u1").await.unwrap();
    assert_eq!(outcome.summary, "운세 이야기 - 종합 84점");
    assert!(outcome.result.is_some());
}

#[tokio::test]
async fn second_completion_returns_stored_state_without_generation() {
    let h = harness().await;
    let session = h.service.start("u1", "astrology", "별자리").await.unwrap();

    let first = h.service.complete_session(session.id, "u1").await.unwrap();
    let second = h.service.complete_session(session.id, "u1").await.unwrap();

    assert!(second.already_completed);
    assert_eq!(second.summary, first.summary);
    assert_eq!(second.result.map(|r| r.id), first.result.map(|r| r.id));
    assert_eq!(h.generator.analyze_calls().len(), 1);
}

#[tokio::test]
async fn completion_tolerates_result_written_concurrently() {
    let h = harness().await;
    let session = h.service.start("u1", "saju", "사주").await.unwrap();
    let existing = FortuneAnalysis { overall_score: 55, ..analysis_for(&FortuneType::Saju) };
    let stored = h
        .storage
        .create_result(&NewFortuneResult::new(session.id, FortuneType::Saju, existing))
        .await
        .unwrap();

    let outcome = h.service.complete_session(session.id, "u1").await.unwrap();
    let result = outcome.result.unwrap();
    assert_eq!(result.id, stored.id);
    assert_eq!(result.overall_score, 55);
    assert_eq!(outcome.summary, "사주 이야기 - 종합 55점");
}

#[tokio::test]
async fn analysis_failure_leaves_session_open() {
    let h = harness_with(ScriptedGenerator::failing()).await;
    let session = h.service.start("u1", "saju", "사주").await.unwrap();

    let err = h.service.complete_session(session.id, "u1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Generation(_)));
    assert!(!h.storage.get_session(session.id).await.unwrap().unwrap().is_completed);
}

#[tokio::test]
async fn completion_checks_ownership() {
    let h = harness().await;
    let session = h.service.start("u1", "saju", "사주").await.unwrap();
    let err = h.service.complete_session(session.id, "u2").await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    let err = h.service.complete_session(4242, "u1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn detail_is_owner_only() {
    let h = harness().await;
    let session = h.service.start("u1", "casual", "대화").await.unwrap();

    let detail = h.service.get_session_detail(session.id, "u1").await.unwrap();
    assert_eq!(detail.session.id, session.id);
    assert_eq!(detail.messages.len(), 1);
    assert!(detail.result.is_none());

    let err = h.service.get_session_detail(session.id, "u2").await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    let err = h.service.get_session_detail(777, "u1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn windows_split_history_and_validate_hours() {
    let h = harness().await;
    let now = Utc::now();
    for (title, age) in [("recent", Duration::hours(2)), ("old", Duration::hours(30))] {
        h.storage
            .create_session(
                &NewSession::new("u1".to_owned(), FortuneType::Saju, title.to_owned())
                    .created_at(now - age)
                    .finished("요약".to_owned()),
            )
            .await
            .unwrap();
    }
    // never received a user message
    h.service.start("u1", "saju", "empty").await.unwrap();

    let recent = h.service.recent_sessions("u1", 24).await.unwrap();
    assert_eq!(recent.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), vec!["recent"]);
    let old = h.service.old_sessions("u1", 24).await.unwrap();
    assert_eq!(old.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), vec!["old"]);
    let all = h.service.list_sessions("u1").await.unwrap();
    assert_eq!(all.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), vec!["recent", "old"]);

    for hours in [0, -3, MAX_WINDOW_HOURS + 1] {
        let err = h.service.recent_sessions("u1", hours).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)), "{hours}");
        let err = h.service.old_sessions("u1", hours).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)), "{hours}");
    }
}

#[tokio::test]
async fn saju_consultation_end_to_end() {
    let h = harness().await;
    let session = h.service.start("u1", "saju", "연애 사주").await.unwrap();
    h.service.send_message(session.id, "연애운 알려주세요", "u1").await.unwrap();

    let outcome = h.service.complete_session(session.id, "u1").await.unwrap();
    let result = outcome.result.unwrap();
    assert!((1..=100).contains(&result.overall_score));
    assert!(result.analysis.saju_pillars.is_some());

    let detail = h.service.get_session_detail(session.id, "u1").await.unwrap();
    assert!(detail.session.is_completed);
    assert_eq!(detail.messages.len(), 3);
    assert_eq!(detail.result.map(|r| r.id), Some(result.id));

    let listed = h.service.list_sessions("u1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].summary.as_deref(), Some(outcome.summary.as_str()));
}

#[tokio::test]
async fn demo_seed_populates_both_windows() {
    let h = harness().await;
    let report = h.service.seed_demo_data("demo-user").await.unwrap();
    assert_eq!(report.sessions, 6);
    assert_eq!(report.messages, 12);
    assert_eq!(report.results, 3);

    assert_eq!(h.service.recent_sessions("demo-user", 24).await.unwrap().len(), 2);
    let old = h.service.old_sessions("demo-user", 24).await.unwrap();
    assert_eq!(old.len(), 4);
    assert_eq!(old[0].title, "첫 번째 사주 이야기");
    assert!(old.iter().all(|s| s.is_completed));

    let err = h.service.seed_demo_data(" ").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}
