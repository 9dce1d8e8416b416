//! Scripted generator and fixtures shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fortune_core::{
    FortuneAnalysis, FortuneType, Profile, ProfileInput, SajuPillars, UserUpsert,
};
use fortune_llm::{ChatTurn, FortuneGenerator, LlmError};
use fortune_storage::StorageBackend;
use fortune_storage::traits::{ProfileStore, UserStore};

use crate::FortuneService;

/// A recorded `reply` call.
#[derive(Debug, Clone)]
pub struct ReplyCall {
    pub fortune_type: FortuneType,
    pub history: Vec<ChatTurn>,
    pub user_text: String,
}

#[derive(Default)]
pub struct ScriptedGenerator {
    pub fail: bool,
    pub replies: Mutex<Vec<ReplyCall>>,
    pub transcripts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn reply_calls(&self) -> Vec<ReplyCall> {
        self.replies.lock().unwrap().clone()
    }

    pub fn analyze_calls(&self) -> Vec<String> {
        self.transcripts.lock().unwrap().clone()
    }
}

pub fn analysis_for(fortune_type: &FortuneType) -> FortuneAnalysis {
    FortuneAnalysis {
        overall_score: 84,
        love_score: 90,
        wealth_score: 71,
        health_score: 77,
        personality: "섬세하고 따뜻함".to_owned(),
        love_life: "가까운 곳에 좋은 인연".to_owned(),
        wealth: "지출 관리가 중요".to_owned(),
        health: "수면 습관 개선".to_owned(),
        recommendations: vec!["아침 산책".to_owned(), "감사 일기".to_owned()],
        five_elements: None,
        saju_pillars: matches!(fortune_type, FortuneType::Saju).then(|| SajuPillars {
            year: "갑술".to_owned(),
            month: "병인".to_owned(),
            day: "기사".to_owned(),
            hour: "경오".to_owned(),
        }),
        tarot_cards: None,
        zodiac_sign: None,
    }
}

#[async_trait]
impl FortuneGenerator for ScriptedGenerator {
    async fn reply(
        &self,
        fortune_type: &FortuneType,
        _profile: &Profile,
        history: &[ChatTurn],
        user_text: &str,
    ) -> Result<String, LlmError> {
        self.replies.lock().unwrap().push(ReplyCall {
            fortune_type: fortune_type.clone(),
            history: history.to_vec(),
            user_text: user_text.to_owned(),
        });
        if self.fail {
            return Err(LlmError::HttpStatus { code: 500, body: "boom".to_owned() });
        }
        Ok(format!("{fortune_type} 답변: {user_text}"))
    }

    async fn analyze(
        &self,
        fortune_type: &FortuneType,
        _profile: &Profile,
        transcript: &str,
    ) -> Result<FortuneAnalysis, LlmError> {
        self.transcripts.lock().unwrap().push(transcript.to_owned());
        if self.fail {
            return Err(LlmError::EmptyResponse);
        }
        Ok(analysis_for(fortune_type))
    }
}

pub struct Harness {
    pub service: FortuneService,
    pub storage: Arc<StorageBackend>,
    pub generator: Arc<ScriptedGenerator>,
}

/// Memory-backed service with users `u1` (profile set up) and `u2` (no profile).
pub async fn harness_with(generator: ScriptedGenerator) -> Harness {
    let storage = Arc::new(StorageBackend::new_memory());
    storage.upsert_user(&UserUpsert::new("u1")).await.unwrap();
    storage.upsert_user(&UserUpsert::new("u2")).await.unwrap();
    let input = ProfileInput::parse(
        Some("1994-02-11"),
        Some("13:20"),
        Some("서울"),
        Some("female"),
        vec!["saju".to_owned()],
    )
    .unwrap();
    storage.create_profile("u1", &input).await.unwrap();

    let generator = Arc::new(generator);
    let service = FortuneService::new(Arc::clone(&storage), generator.clone());
    Harness { service, storage, generator }
}

pub async fn harness() -> Harness {
    harness_with(ScriptedGenerator::default()).await
}
