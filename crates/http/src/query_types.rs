//! Request/query types (Deserialize)

use serde::Deserialize;

/// Body of `POST /api/fortune/sessions`.
///
/// Fields are optional so a missing value reaches validation and yields 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(default)]
    pub fortune_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub birth_location: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub preferred_fortune_types: Vec<String>,
}

/// `?hours=N` for the history windows; falls back to the configured default.
#[derive(Debug, Default, Deserialize)]
pub struct HoursQuery {
    pub hours: Option<i64>,
}

impl HoursQuery {
    pub fn or_default(&self, default_hours: i64) -> i64 {
        self.hours.unwrap_or(default_hours)
    }
}
