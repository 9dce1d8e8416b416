//! Session lifecycle: start, converse, complete, and read back.

use std::sync::Arc;

use fortune_core::{
    CASUAL_SUMMARY, FortuneResult, FortuneType, MAX_WINDOW_HOURS, Message, NewFortuneResult,
    NewMessage, NewSession, Profile, Session,
};
use fortune_llm::{ChatTurn, FortuneGenerator};
use fortune_storage::StorageBackend;
use fortune_storage::traits::{
    MessageStore, ProfileStore, ResultStore, SessionStore, UserStore,
};
use serde::Serialize;

use crate::error::ServiceError;

/// What `complete_session` reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub session_id: i64,
    pub summary: String,
    pub result: Option<FortuneResult>,
    /// The session had already been completed before this call.
    pub already_completed: bool,
}

/// A session with its full conversation and optional result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub session: Session,
    pub messages: Vec<Message>,
    pub result: Option<FortuneResult>,
}

pub struct FortuneService {
    pub(crate) storage: Arc<StorageBackend>,
    generator: Arc<dyn FortuneGenerator>,
}

impl FortuneService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, generator: Arc<dyn FortuneGenerator>) -> Self {
        Self { storage, generator }
    }

    /// Opens a session and writes the canned greeting for its type.
    pub async fn start(
        &self,
        user_id: &str,
        fortune_type: &str,
        title: &str,
    ) -> Result<Session, ServiceError> {
        let fortune_type = non_blank(fortune_type, "fortuneType")?;
        let title = non_blank(title, "title")?;
        if self.storage.get_user(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }

        let fortune_type = FortuneType::parse(fortune_type);
        let session = self
            .storage
            .create_session(&NewSession::new(user_id.to_owned(), fortune_type, title.to_owned()))
            .await?;
        let greeting = NewMessage::greeting(session.id, &session.fortune_type);
        self.storage.create_message(&greeting).await?;

        tracing::info!(
            session_id = session.id,
            user_id,
            fortune_type = %session.fortune_type,
            "session started"
        );
        Ok(session)
    }

    /// Persists the user's message, asks the generator for a reply and persists it.
    ///
    /// A generation failure leaves the user message in place.
    pub async fn send_message(
        &self,
        session_id: i64,
        user_text: &str,
        requester_id: &str,
    ) -> Result<Message, ServiceError> {
        if user_text.trim().is_empty() {
            return Err(ServiceError::InvalidInput("message must not be empty".to_owned()));
        }
        let session = self.owned_session(session_id, requester_id).await?;
        if session.is_completed {
            let msg = format!("session {session_id} is already completed");
            return Err(ServiceError::Conflict(msg));
        }
        let profile = self.profile_of(requester_id).await?;
        if !profile.is_setup_complete {
            return Err(ServiceError::not_found("profile", requester_id));
        }

        let user_message = self
            .storage
            .create_message(&NewMessage::user(session.id, user_text.to_owned()))
            .await?;
        if !session.has_user_message && self.storage.mark_user_message(session.id).await? {
            tracing::debug!(session_id, "session received its first user message");
        }

        let history: Vec<ChatTurn> = self
            .storage
            .get_session_messages(session.id)
            .await?
            .into_iter()
            .filter(|m| {
                m.id != user_message.id
                    && !m.is_greeting()
                    && !m.is_legacy_greeting(&session.fortune_type)
            })
            .map(|m| ChatTurn::new(m.role, m.content))
            .collect();

        let reply = self
            .generator
            .reply(&session.fortune_type, &profile, &history, user_text)
            .await
            .inspect_err(|e| tracing::warn!(session_id, error = %e, "reply generation failed"))?;

        let assistant = NewMessage::assistant(session.id, reply);
        Ok(self.storage.create_message(&assistant).await?)
    }

    /// Completes a session, analysing it unless it is a casual chat.
    ///
    /// Calling this on an already completed session returns the stored state
    /// without contacting the generator.
    pub async fn complete_session(
        &self,
        session_id: i64,
        requester_id: &str,
    ) -> Result<CompletionOutcome, ServiceError> {
        let session = self.owned_session(session_id, requester_id).await?;
        let profile = self.profile_of(&session.user_id).await?;

        if session.is_completed {
            return Ok(CompletionOutcome {
                session_id,
                summary: session.summary.unwrap_or_default(),
                result: self.storage.get_result(session_id).await?,
                already_completed: true,
            });
        }

        let (summary, result) = match &session.fortune_type {
            FortuneType::Casual => (CASUAL_SUMMARY.to_owned(), None),
            other @ (FortuneType::Saju
            | FortuneType::Tarot
            | FortuneType::Astrology
            | FortuneType::Other(_)) => {
                let result = self.analyse(&session, other, &profile).await?;
                let summary = format!("{} - 종합 {}점", other.story_label(), result.overall_score);
                (summary, Some(result))
            },
        };

        let summary = if self.storage.complete_session(session_id, &summary).await? {
            summary
        } else {
            tracing::warn!(session_id, "session completed concurrently, keeping stored summary");
            self.storage
                .get_session(session_id)
                .await?
                .and_then(|s| s.summary)
                .unwrap_or(summary)
        };

        tracing::info!(
            session_id,
            fortune_type = %session.fortune_type,
            summary = %summary,
            "session completed"
        );
        Ok(CompletionOutcome { session_id, summary, result, already_completed: false })
    }

    async fn analyse(
        &self,
        session: &Session,
        fortune_type: &FortuneType,
        profile: &Profile,
    ) -> Result<FortuneResult, ServiceError> {
        let transcript = self
            .storage
            .get_session_messages(session.id)
            .await?
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n");

        let analysis = self
            .generator
            .analyze(fortune_type, profile, &transcript)
            .await
            .inspect_err(|e| {
                tracing::warn!(session_id = session.id, error = %e, "analysis generation failed");
            })?;

        let new_result = NewFortuneResult::new(session.id, fortune_type.clone(), analysis);
        match self.storage.create_result(&new_result).await {
            Ok(result) => Ok(result),
            Err(e) if e.is_duplicate() => {
                tracing::warn!(session_id = session.id, "result already stored concurrently");
                self.storage
                    .get_result(session.id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("result", session.id))
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_session_detail(
        &self,
        session_id: i64,
        requester_id: &str,
    ) -> Result<SessionDetail, ServiceError> {
        let session = self.owned_session(session_id, requester_id).await?;
        let messages = self.storage.get_session_messages(session_id).await?;
        let result = self.storage.get_result(session_id).await?;
        Ok(SessionDetail { session, messages, result })
    }

    /// Sessions with at least one user message, newest first.
    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>, ServiceError> {
        Ok(self.storage.list_user_sessions(user_id).await?)
    }

    pub async fn recent_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, ServiceError> {
        validate_hours(hours)?;
        Ok(self.storage.recent_user_sessions(user_id, hours).await?)
    }

    pub async fn old_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, ServiceError> {
        validate_hours(hours)?;
        Ok(self.storage.old_user_sessions(user_id, hours).await?)
    }

    async fn owned_session(
        &self,
        session_id: i64,
        requester_id: &str,
    ) -> Result<Session, ServiceError> {
        let session = self
            .storage
            .get_session(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("session", session_id))?;
        if !session.is_owned_by(requester_id) {
            tracing::warn!(session_id, requester_id, "session access denied");
            return Err(ServiceError::Forbidden(format!("session {session_id}")));
        }
        Ok(session)
    }

    async fn profile_of(&self, user_id: &str) -> Result<Profile, ServiceError> {
        self.storage
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile", user_id))
    }
}

fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

fn validate_hours(hours: i64) -> Result<(), ServiceError> {
    if hours <= 0 || hours > MAX_WINDOW_HOURS {
        return Err(ServiceError::InvalidInput(format!(
            "hours must be between 1 and {MAX_WINDOW_HOURS}, got {hours}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "fortune_service_tests.rs"]
mod tests;
