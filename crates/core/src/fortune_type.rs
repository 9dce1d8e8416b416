//! Divination modes a session can be opened in.

use std::fmt;

use serde::{Deserialize, Serialize};

const SAJU_GREETING: &str =
    "안녕하세요! 사주 상담사입니다. 생년월일을 바탕으로 성격과 삶의 방향에 대해 편안하게 이야기해보세요. 어떤 것이 궁금하신가요?";
const TAROT_GREETING: &str =
    "안녕하세요! 타로와 함께 편안한 대화를 나눠보세요. 일상의 고민이나 궁금한 것들을 자유롭게 말씀해 주세요.";
const ASTROLOGY_GREETING: &str =
    "안녕하세요! 별자리 이야기를 함께 나눠보아요. 당신의 특성이나 궁금한 점들을 편하게 말씀해 주세요.";
const CASUAL_GREETING: &str =
    "안녕하세요! 편안하게 이야기를 나눠보아요. 일상의 고민, 궁금한 점, 무엇이든 자유롭게 말씀해 주세요.";
const DEFAULT_GREETING: &str =
    "안녕하세요! 편안한 대화를 나눠보세요. 어떤 이야기든 자유롭게 말씀해 주세요.";

/// Conversation mode of a fortune session.
///
/// Unrecognized modes are not rejected: they are kept verbatim in
/// [`FortuneType::Other`] and get the generic greeting and prompts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FortuneType {
    /// Korean four-pillars reading
    Saju,
    /// Tarot reading
    Tarot,
    /// Western astrology
    Astrology,
    /// Free conversation, completed without a scored analysis
    Casual,
    /// Any other mode requested by the client
    Other(String),
}

impl FortuneType {
    /// Parses a client-supplied mode. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "saju" => Self::Saju,
            "tarot" => Self::Tarot,
            "astrology" => Self::Astrology,
            "casual" => Self::Casual,
            _ => Self::Other(raw.trim().to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Saju => "saju",
            Self::Tarot => "tarot",
            Self::Astrology => "astrology",
            Self::Casual => "casual",
            Self::Other(raw) => raw,
        }
    }

    /// Whether completion skips the scored analysis.
    #[must_use]
    pub const fn is_casual(&self) -> bool {
        matches!(self, Self::Casual)
    }

    /// Canned assistant message that opens a session of this mode.
    #[must_use]
    pub const fn greeting(&self) -> &'static str {
        match self {
            Self::Saju => SAJU_GREETING,
            Self::Tarot => TAROT_GREETING,
            Self::Astrology => ASTROLOGY_GREETING,
            Self::Casual => CASUAL_GREETING,
            Self::Other(_) => DEFAULT_GREETING,
        }
    }

    /// Label used in the completion summary of analysed sessions.
    #[must_use]
    pub const fn story_label(&self) -> &'static str {
        match self {
            Self::Saju => "사주 이야기",
            Self::Tarot => "타로 이야기",
            Self::Astrology => "별자리 이야기",
            Self::Casual => "이야기",
            Self::Other(_) => "운세 이야기",
        }
    }
}

impl fmt::Display for FortuneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FortuneType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for FortuneType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<FortuneType> for String {
    fn from(fortune_type: FortuneType) -> Self {
        match fortune_type {
            FortuneType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes_case_insensitively() {
        assert_eq!(FortuneType::parse("saju"), FortuneType::Saju);
        assert_eq!(FortuneType::parse(" Tarot "), FortuneType::Tarot);
        assert_eq!(FortuneType::parse("ASTROLOGY"), FortuneType::Astrology);
        assert_eq!(FortuneType::parse("casual"), FortuneType::Casual);
    }

    #[test]
    fn unknown_mode_is_preserved() {
        let ft = FortuneType::parse("numerology");
        assert_eq!(ft, FortuneType::Other("numerology".to_owned()));
        assert_eq!(ft.as_str(), "numerology");
        assert_eq!(ft.greeting(), DEFAULT_GREETING);
    }

    #[test]
    fn greetings_are_distinct_per_mode() {
        let greetings = [
            FortuneType::Saju.greeting(),
            FortuneType::Tarot.greeting(),
            FortuneType::Astrology.greeting(),
            FortuneType::Casual.greeting(),
            FortuneType::Other("x".to_owned()).greeting(),
        ];
        for (i, a) in greetings.iter().enumerate() {
            for b in greetings.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&FortuneType::Saju).unwrap();
        assert_eq!(json, "\"saju\"");
        let back: FortuneType = serde_json::from_str("\"palmistry\"").unwrap();
        assert_eq!(back, FortuneType::Other("palmistry".to_owned()));
    }
}
