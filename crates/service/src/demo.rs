//! Sample history for a user, so the history screens have something to show.

use chrono::{DateTime, Duration, Utc};
use fortune_core::{
    FortuneAnalysis, FortuneType, NewFortuneResult, NewMessage, NewSession, UserUpsert,
};
use fortune_storage::traits::{MessageStore, ResultStore, SessionStore, UserStore};
use serde::Serialize;

use crate::error::ServiceError;
use crate::fortune_service::FortuneService;

const OLD_OPENING: &str = "안녕하세요! 오늘 운세를 봐주세요.";
const RECENT_OPENING: &str = "안녕하세요! 궁금한 게 있어서 왔어요.";

struct DemoSession {
    fortune_type: FortuneType,
    title: &'static str,
    summary: &'static str,
    age: Duration,
}

fn old_sessions() -> [DemoSession; 4] {
    [
        DemoSession {
            fortune_type: FortuneType::Saju,
            title: "첫 번째 사주 이야기",
            summary: "새로운 시작과 희망에 대한 운세를 봤습니다. 금년에는 새로운 기회가 많이 올 것 같다는 좋은 소식을 들었어요.",
            age: Duration::days(4),
        },
        DemoSession {
            fortune_type: FortuneType::Tarot,
            title: "사랑 운세 타로",
            summary: "연애 운에 대해 물어봤는데, 곧 좋은 인연이 찾아올 것 같다는 카드가 나왔어요. 마음을 열고 기다려보라고 하네요.",
            age: Duration::days(5),
        },
        DemoSession {
            fortune_type: FortuneType::Astrology,
            title: "별자리 운세 상담",
            summary: "이번 달 별자리 운세를 봤는데, 전반적으로 안정적이고 창의적인 에너지가 강하다고 하더라고요.",
            age: Duration::days(6),
        },
        DemoSession {
            fortune_type: FortuneType::Casual,
            title: "일상 대화",
            summary: "오늘 하루 어떻게 보냈는지, 앞으로의 계획에 대해 편안하게 이야기를 나눴어요.",
            age: Duration::days(7),
        },
    ]
}

fn recent_sessions() -> [DemoSession; 2] {
    [
        DemoSession {
            fortune_type: FortuneType::Saju,
            title: "오늘의 사주 운세",
            summary: "오늘 하루 운세에 대해 물어봤습니다.",
            age: Duration::hours(2),
        },
        DemoSession {
            fortune_type: FortuneType::Casual,
            title: "가벼운 대화",
            summary: "요즘 고민에 대해 편안하게 대화했어요.",
            age: Duration::minutes(30),
        },
    ]
}

/// Deterministic score in `70..=99` for the `slot`-th score of the `index`-th session.
fn demo_score(index: usize, slot: usize) -> i32 {
    let spread = index.wrapping_mul(37).wrapping_add(slot.wrapping_mul(11)) % 30;
    70 + i32::try_from(spread).unwrap_or(0)
}

fn demo_analysis(index: usize) -> FortuneAnalysis {
    FortuneAnalysis {
        overall_score: demo_score(index, 0),
        love_score: demo_score(index, 1),
        wealth_score: demo_score(index, 2),
        health_score: demo_score(index, 3),
        personality: "따뜻하고 창의적인 성격".to_owned(),
        love_life: "좋은 인연이 기다리고 있어요".to_owned(),
        wealth: "안정적인 재정 운이 계속될 것 같아요".to_owned(),
        health: "건강 관리에 조금 더 신경쓰시면 좋겠어요".to_owned(),
        recommendations: vec![
            "새로운 도전을 해보세요".to_owned(),
            "주변 사람들과 더 많은 시간을 보내세요".to_owned(),
        ],
        five_elements: None,
        saju_pillars: None,
        tarot_cards: None,
        zodiac_sign: None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSeedReport {
    pub sessions: usize,
    pub messages: usize,
    pub results: usize,
}

impl FortuneService {
    /// Inserts four completed sessions from last week and two from today.
    ///
    /// Creates the user row if it does not exist yet.
    pub async fn seed_demo_data(&self, user_id: &str) -> Result<DemoSeedReport, ServiceError> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("user id must not be empty".to_owned()));
        }
        if self.storage.get_user(user_id).await?.is_none() {
            self.storage.upsert_user(&UserUpsert::new(user_id)).await?;
        }

        let now = Utc::now();
        let mut report = DemoSeedReport::default();
        for (index, demo) in old_sessions().into_iter().enumerate() {
            let created_at = now - demo.age;
            let session_id =
                self.seed_session(user_id, &demo, created_at, OLD_OPENING, &mut report).await?;
            if !demo.fortune_type.is_casual() {
                let result =
                    NewFortuneResult::new(session_id, demo.fortune_type, demo_analysis(index))
                        .created_at(created_at + Duration::minutes(2));
                self.storage.create_result(&result).await?;
                report.results = report.results.saturating_add(1);
            }
        }
        for demo in recent_sessions() {
            let created_at = now - demo.age;
            self.seed_session(user_id, &demo, created_at, RECENT_OPENING, &mut report).await?;
        }

        tracing::info!(
            user_id,
            sessions = report.sessions,
            results = report.results,
            "demo data seeded"
        );
        Ok(report)
    }

    async fn seed_session(
        &self,
        user_id: &str,
        demo: &DemoSession,
        created_at: DateTime<Utc>,
        opening: &str,
        report: &mut DemoSeedReport,
    ) -> Result<i64, ServiceError> {
        let session = self
            .storage
            .create_session(
                &NewSession::new(
                    user_id.to_owned(),
                    demo.fortune_type.clone(),
                    demo.title.to_owned(),
                )
                .created_at(created_at)
                .finished(demo.summary.to_owned()),
            )
            .await?;
        self.storage
            .create_message(
                &NewMessage::user(session.id, opening.to_owned()).created_at(created_at),
            )
            .await?;
        self.storage
            .create_message(
                &NewMessage::assistant(session.id, demo.summary.to_owned())
                    .created_at(created_at + Duration::minutes(1)),
            )
            .await?;
        report.sessions = report.sessions.saturating_add(1);
        report.messages = report.messages.saturating_add(2);
        Ok(session.id)
    }
}
