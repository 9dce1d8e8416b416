//! Scored analysis produced once, when a non-casual session completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::FortuneType;

/// Five-element balance in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiveElements {
    pub wood: i32,
    pub fire: i32,
    pub earth: i32,
    pub metal: i32,
    pub water: i32,
}

/// The four pillars of a saju reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SajuPillars {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
}

/// Structured analysis payload as returned by the generator and persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FortuneAnalysis {
    pub overall_score: i32,
    pub love_score: i32,
    pub wealth_score: i32,
    pub health_score: i32,
    pub personality: String,
    pub love_life: String,
    pub wealth: String,
    pub health: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub five_elements: Option<FiveElements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saju_pillars: Option<SajuPillars>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarot_cards: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zodiac_sign: Option<String>,
}

impl FortuneAnalysis {
    /// Recommendations flattened one per line, `None` when there are none.
    #[must_use]
    pub fn recommendations_text(&self) -> Option<String> {
        (!self.recommendations.is_empty()).then(|| self.recommendations.join("\n"))
    }
}

/// Persisted analysis of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FortuneResult {
    pub id: i64,
    pub session_id: i64,
    pub fortune_type: FortuneType,
    pub overall_score: i32,
    pub love_score: i32,
    pub wealth_score: i32,
    pub health_score: i32,
    pub analysis: FortuneAnalysis,
    pub recommendations: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a result row.
#[derive(Debug, Clone)]
pub struct NewFortuneResult {
    pub session_id: i64,
    pub fortune_type: FortuneType,
    pub analysis: FortuneAnalysis,
    pub created_at: DateTime<Utc>,
}

impl NewFortuneResult {
    #[must_use]
    pub fn new(session_id: i64, fortune_type: FortuneType, analysis: FortuneAnalysis) -> Self {
        Self { session_id, fortune_type, analysis, created_at: Utc::now() }
    }

    #[must_use]
    pub fn created_at(self, created_at: DateTime<Utc>) -> Self {
        Self { created_at, ..self }
    }

    /// Materializes the stored row once the backend assigned an id.
    #[must_use]
    pub fn into_result(self, id: i64) -> FortuneResult {
        let recommendations = self.analysis.recommendations_text();
        FortuneResult {
            id,
            session_id: self.session_id,
            fortune_type: self.fortune_type,
            overall_score: self.analysis.overall_score,
            love_score: self.analysis.love_score,
            wealth_score: self.analysis.wealth_score,
            health_score: self.analysis.health_score,
            analysis: self.analysis,
            recommendations,
            created_at: self.created_at,
        }
    }
}
