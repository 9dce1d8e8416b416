//! Birth data used to personalize generation.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Label used inside generation prompts.
    #[must_use]
    pub const fn korean_label(&self) -> &'static str {
        match self {
            Self::Male => "남성",
            Self::Female => "여성",
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(CoreError::InvalidGender(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub user_id: String,
    pub birth_date: NaiveDate,
    /// `HH:mm`, when known
    pub birth_time: Option<String>,
    pub birth_location: String,
    pub gender: Gender,
    pub preferred_fortune_types: Vec<String>,
    pub is_setup_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create-or-update payload for a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    pub birth_date: NaiveDate,
    pub birth_time: Option<String>,
    pub birth_location: String,
    pub gender: Gender,
    pub preferred_fortune_types: Vec<String>,
    pub is_setup_complete: bool,
}

impl ProfileInput {
    /// Validates raw client fields.
    ///
    /// The birth date accepts `YYYY-MM-DD` or an RFC 3339 timestamp; an empty
    /// birth time is treated as unknown.
    pub fn parse(
        birth_date: Option<&str>,
        birth_time: Option<&str>,
        birth_location: Option<&str>,
        gender: Option<&str>,
        preferred_fortune_types: Vec<String>,
    ) -> Result<Self, CoreError> {
        let birth_date = non_blank(birth_date).ok_or(CoreError::MissingField("birthDate"))?;
        let birth_date = parse_birth_date(birth_date)?;
        let birth_time = non_blank(birth_time).map(parse_birth_time).transpose()?;
        let birth_location =
            non_blank(birth_location).ok_or(CoreError::MissingField("birthLocation"))?.to_owned();
        let gender = non_blank(gender).ok_or(CoreError::MissingField("gender"))?.parse()?;
        Ok(Self {
            birth_date,
            birth_time,
            birth_location,
            gender,
            preferred_fortune_types,
            is_setup_complete: true,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| CoreError::InvalidBirthDate(raw.to_owned()))
}

/// Normalizes a birth time to zero-padded `HH:mm`.
pub fn parse_birth_time(raw: &str) -> Result<String, CoreError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| CoreError::InvalidBirthTime(raw.to_owned()))
}
