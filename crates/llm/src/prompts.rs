//! Korean prompt texts for replies and analyses.

use fortune_core::{FortuneType, Profile};

const SAJU_PERSONA: &str = "당신은 경험이 풍부한 사주 전문가입니다. 한국의 전통 사주팔자를 바탕으로 정확하고 의미 있는 해석을 제공합니다.";
const SAJU_GUIDE: &str = "사주 해석 시 다음을 고려하세요:
- 천간과 지지의 조합
- 오행의 균형과 상생상극
- 대운과 세운의 영향
- 십신과 용신 분석

친근하고 이해하기 쉽게 설명하되, 전문적인 근거를 바탕으로 답변하세요.";

const TAROT_PERSONA: &str = "당신은 숙련된 타로 리더입니다. 타로 카드의 상징과 의미를 깊이 이해하고 있으며, 직관적이고 통찰력 있는 해석을 제공합니다.";
const TAROT_GUIDE: &str = "타로 리딩 시 다음을 고려하세요:
- 카드의 상징적 의미
- 카드 간의 관계와 배치
- 질문자의 상황과 에너지
- 과거, 현재, 미래의 흐름

신비롭고 영감을 주는 방식으로 메시지를 전달하세요.";

const ASTROLOGY_PERSONA: &str = "당신은 전문 점성술사입니다. 서양 점성술의 원리를 바탕으로 행성의 위치와 별자리의 영향을 해석합니다.";
const ASTROLOGY_GUIDE: &str = "점성술 해석 시 다음을 고려하세요:
- 태양, 달, 상승별자리의 의미
- 행성들의 위치와 상호작용
- 하우스 시스템
- 현재 행성의 운행

과학적이면서도 직관적인 접근으로 설명하세요.";

const DEFAULT_PERSONA: &str = "당신은 종합적인 운세 상담사입니다. 다양한 점술 분야의 지식을 바탕으로 도움이 되는 조언을 제공합니다.";
const DEFAULT_GUIDE: &str = "상담 시 공감하고 격려하는 톤으로 답변하세요.";

const UNKNOWN_BIRTH_TIME: &str = "정보 없음";

fn profile_block(profile: &Profile) -> String {
    format!(
        "사용자 정보:
- 생년월일: {}
- 출생시각: {}
- 출생지: {}
- 성별: {}",
        profile.birth_date.format("%Y-%m-%d"),
        profile.birth_time.as_deref().unwrap_or(UNKNOWN_BIRTH_TIME),
        profile.birth_location,
        profile.gender.korean_label(),
    )
}

/// System instruction for conversational replies.
#[must_use]
pub fn system_prompt(fortune_type: &FortuneType, profile: &Profile) -> String {
    let (persona, guide) = match fortune_type {
        FortuneType::Saju => (SAJU_PERSONA, SAJU_GUIDE),
        FortuneType::Tarot => (TAROT_PERSONA, TAROT_GUIDE),
        FortuneType::Astrology => (ASTROLOGY_PERSONA, ASTROLOGY_GUIDE),
        FortuneType::Casual | FortuneType::Other(_) => (DEFAULT_PERSONA, DEFAULT_GUIDE),
    };
    format!("{persona}\n\n{}\n\n{guide}", profile_block(profile))
}

/// System instruction for the completion analysis.
#[must_use]
pub fn analysis_system_prompt(fortune_type: &FortuneType, profile: &Profile) -> String {
    format!(
        "당신은 {fortune_type} 전문가로서 상세한 분석 보고서를 작성합니다.
사용자 정보를 바탕으로 정확하고 구체적인 분석을 제공하며,
모든 점수는 1-100 사이의 정수로, 모든 텍스트는 한국어로 작성해주세요.
반드시 유효한 JSON 형식으로 응답하세요.

{}",
        profile_block(profile)
    )
}

fn type_specific_fields(fortune_type: &FortuneType) -> &'static str {
    match fortune_type {
        FortuneType::Saju => {
            r#",
  "fiveElements": {
    "wood": 백분율,
    "fire": 백분율,
    "earth": 백분율,
    "metal": 백분율,
    "water": 백분율
  },
  "sajuPillars": {
    "year": "년주",
    "month": "월주",
    "day": "일주",
    "hour": "시주"
  }"#
        },
        FortuneType::Tarot => r#",
  "tarotCards": ["카드1", "카드2", "카드3"]"#,
        FortuneType::Astrology => r#",
  "zodiacSign": "별자리명""#,
        FortuneType::Casual | FortuneType::Other(_) => "",
    }
}

/// User turn of the analysis request: the transcript plus the expected JSON shape.
#[must_use]
pub fn analysis_user_prompt(fortune_type: &FortuneType, transcript: &str) -> String {
    format!(
        r#"대화 요약: {transcript}

위 대화를 바탕으로 상세한 운세 분석을 JSON 형태로 제공해주세요.
반드시 다음 형식을 따라주세요:
{{
  "overallScore": 점수(1-100),
  "loveScore": 점수(1-100),
  "wealthScore": 점수(1-100),
  "healthScore": 점수(1-100),
  "personality": "성격 분석 내용",
  "loveLife": "연애운 분석 내용",
  "wealth": "재물운 분석 내용",
  "health": "건강운 분석 내용",
  "recommendations": ["조언1", "조언2", "조언3"]{}
}}"#,
        type_specific_fields(fortune_type)
    )
}
