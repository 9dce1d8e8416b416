//! Validation and coercion of the analysis JSON returned by the model.
//!
//! Scores are accepted as integers, floats (rounded) or numeric strings and
//! clamped to `SCORE_MIN..=SCORE_MAX`. Type-specific extras are required for
//! their own fortune type and dropped for every other type.

use fortune_core::{FiveElements, FortuneAnalysis, FortuneType, SajuPillars, SCORE_MAX, SCORE_MIN};
use serde_json::{Map, Value};

use crate::client::truncate;
use crate::error::LlmError;

/// Strips a surrounding Markdown code fence, with or without a `json` tag.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```JSON"))
        .or_else(|| trimmed.strip_prefix("```"));
    match inner.and_then(|s| s.trim_end().strip_suffix("```")) {
        Some(body) => body.trim(),
        None => trimmed,
    }
}

/// Parses the raw completion text into a validated [`FortuneAnalysis`].
///
/// # Errors
/// Returns [`LlmError::JsonParse`] when the text is not JSON and
/// [`LlmError::InvalidAnalysis`] when a field is missing or ill-typed.
pub fn parse_analysis(fortune_type: &FortuneType, raw: &str) -> Result<FortuneAnalysis, LlmError> {
    let content = strip_markdown_json(raw);
    let value: Value = serde_json::from_str(content).map_err(|e| LlmError::JsonParse {
        context: format!("analysis (content: {})", truncate(content, 200)),
        source: e,
    })?;
    let obj = value
        .as_object()
        .ok_or_else(|| LlmError::InvalidAnalysis("top-level value is not an object".to_owned()))?;

    let mut analysis = FortuneAnalysis {
        overall_score: score(obj, "overallScore")?,
        love_score: score(obj, "loveScore")?,
        wealth_score: score(obj, "wealthScore")?,
        health_score: score(obj, "healthScore")?,
        personality: text(obj, "personality")?,
        love_life: text(obj, "loveLife")?,
        wealth: text(obj, "wealth")?,
        health: text(obj, "health")?,
        recommendations: string_list(obj, "recommendations")?,
        five_elements: None,
        saju_pillars: None,
        tarot_cards: None,
        zodiac_sign: None,
    };

    match fortune_type {
        FortuneType::Saju => {
            analysis.saju_pillars = Some(saju_pillars(obj)?);
            analysis.five_elements = match obj.get("fiveElements") {
                None | Some(Value::Null) => None,
                Some(v) => Some(five_elements(v)?),
            };
        },
        FortuneType::Tarot => analysis.tarot_cards = Some(string_list(obj, "tarotCards")?),
        FortuneType::Astrology => analysis.zodiac_sign = Some(text(obj, "zodiacSign")?),
        FortuneType::Casual | FortuneType::Other(_) => {},
    }

    Ok(analysis)
}

fn invalid(field: &str, problem: &str) -> LlmError {
    LlmError::InvalidAnalysis(format!("{field}: {problem}"))
}

fn number(value: &Value, field: &str) -> Result<i64, LlmError> {
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(f) if f.is_finite() => Ok(round_saturating(f)),
        _ => Err(invalid(field, "expected a number")),
    }
}

#[allow(clippy::cast_possible_truncation, reason = "float-to-int `as` saturates")]
fn round_saturating(f: f64) -> i64 {
    f.round() as i64
}

fn score(obj: &Map<String, Value>, field: &str) -> Result<i32, LlmError> {
    let value = obj.get(field).ok_or_else(|| invalid(field, "missing"))?;
    let clamped = number(value, field)?.clamp(i64::from(SCORE_MIN), i64::from(SCORE_MAX));
    i32::try_from(clamped).map_err(|_| invalid(field, "out of range"))
}

fn percent(obj: &Map<String, Value>, field: &str) -> Result<i32, LlmError> {
    let value = obj.get(field).ok_or_else(|| invalid(field, "missing"))?;
    let clamped = number(value, field)?.clamp(0, 100);
    i32::try_from(clamped).map_err(|_| invalid(field, "out of range"))
}

fn text(obj: &Map<String, Value>, field: &str) -> Result<String, LlmError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid(field, "expected a string")),
        None => Err(invalid(field, "missing")),
    }
}

fn string_list(obj: &Map<String, Value>, field: &str) -> Result<Vec<String>, LlmError> {
    let items = match obj.get(field) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid(field, "expected a list")),
        None => return Err(invalid(field, "missing")),
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_owned).ok_or_else(|| invalid(field, "expected strings"))
        })
        .collect()
}

fn nested<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, LlmError> {
    match obj.get(field) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(invalid(field, "expected an object")),
        None => Err(invalid(field, "missing")),
    }
}

fn saju_pillars(obj: &Map<String, Value>) -> Result<SajuPillars, LlmError> {
    let pillars = nested(obj, "sajuPillars")?;
    Ok(SajuPillars {
        year: text(pillars, "year")?,
        month: text(pillars, "month")?,
        day: text(pillars, "day")?,
        hour: text(pillars, "hour")?,
    })
}

fn five_elements(value: &Value) -> Result<FiveElements, LlmError> {
    let elements = value.as_object().ok_or_else(|| invalid("fiveElements", "expected an object"))?;
    Ok(FiveElements {
        wood: percent(elements, "wood")?,
        fire: percent(elements, "fire")?,
        earth: percent(elements, "earth")?,
        metal: percent(elements, "metal")?,
        water: percent(elements, "water")?,
    })
}
