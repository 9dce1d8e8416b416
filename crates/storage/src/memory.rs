//! In-process backend used by tests and by servers started without a database.
//!
//! Mirrors the PostgreSQL constraints that the services rely on: unique
//! result per session, unique profile per user, and foreign keys from
//! sessions to users and from messages to sessions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use fortune_core::{
    FortuneResult, Message, NewFortuneResult, NewMessage, NewSession, Profile, ProfileInput,
    Session, User, UserUpsert,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{MessageStore, ProfileStore, ResultStore, SessionStore, UserStore};

#[derive(Debug, Default)]
struct State {
    users: HashMap<String, User>,
    profiles: HashMap<String, Profile>,
    sessions: BTreeMap<i64, Session>,
    messages: Vec<Message>,
    results: HashMap<i64, FortuneResult>,
    next_profile_id: i64,
    next_session_id: i64,
    next_message_id: i64,
    next_result_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter = counter.saturating_add(1);
    *counter
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<State>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn sessions_where(
        &self,
        user_id: &str,
        keep: impl Fn(&Session) -> bool + Send,
    ) -> Vec<Session> {
        let state = self.state.read().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.user_id == user_id && keep(s))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sessions
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn upsert_user(&self, user: &UserUpsert) -> Result<User, StorageError> {
        let mut state = self.state.write().await;
        if let Some(email) = &user.email {
            if state.users.values().any(|u| u.id != user.id && u.email.as_ref() == Some(email)) {
                return Err(StorageError::Duplicate(format!("email {email} already in use")));
            }
        }
        let now = Utc::now();
        let stored = match state.users.get(&user.id) {
            Some(existing) => User {
                email: user.email.clone().or_else(|| existing.email.clone()),
                first_name: user.first_name.clone().or_else(|| existing.first_name.clone()),
                last_name: user.last_name.clone().or_else(|| existing.last_name.clone()),
                profile_image_url: user
                    .profile_image_url
                    .clone()
                    .or_else(|| existing.profile_image_url.clone()),
                updated_at: now,
                ..existing.clone()
            },
            None => User {
                id: user.id.clone(),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                profile_image_url: user.profile_image_url.clone(),
                created_at: now,
                updated_at: now,
            },
        };
        state.users.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }
}

#[async_trait]
impl ProfileStore for MemoryStorage {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StorageError> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn create_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Err(StorageError::MissingReference(format!("user {user_id}")));
        }
        if state.profiles.contains_key(user_id) {
            return Err(StorageError::Duplicate(format!("profile for user {user_id}")));
        }
        let now = Utc::now();
        let profile = Profile {
            id: next_id(&mut state.next_profile_id),
            user_id: user_id.to_owned(),
            birth_date: input.birth_date,
            birth_time: input.birth_time.clone(),
            birth_location: input.birth_location.clone(),
            gender: input.gender,
            preferred_fortune_types: input.preferred_fortune_types.clone(),
            is_setup_complete: input.is_setup_complete,
            created_at: now,
            updated_at: now,
        };
        state.profiles.insert(user_id.to_owned(), profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        let mut state = self.state.write().await;
        let profile = state
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| StorageError::not_found("profile", user_id))?;
        profile.birth_date = input.birth_date;
        profile.birth_time.clone_from(&input.birth_time);
        profile.birth_location.clone_from(&input.birth_location);
        profile.gender = input.gender;
        profile.preferred_fortune_types.clone_from(&input.preferred_fortune_types);
        profile.is_setup_complete = input.is_setup_complete;
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}

#[async_trait]
impl SessionStore for MemoryStorage {
    async fn create_session(&self, session: &NewSession) -> Result<Session, StorageError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&session.user_id) {
            return Err(StorageError::MissingReference(format!("user {}", session.user_id)));
        }
        let stored = Session {
            id: next_id(&mut state.next_session_id),
            user_id: session.user_id.clone(),
            fortune_type: session.fortune_type.clone(),
            title: session.title.clone(),
            summary: session.summary.clone(),
            is_completed: session.is_completed,
            has_user_message: session.has_user_message,
            created_at: session.created_at,
            updated_at: session.created_at,
        };
        state.sessions.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_session(&self, id: i64) -> Result<Option<Session>, StorageError> {
        Ok(self.state.read().await.sessions.get(&id).cloned())
    }

    async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, StorageError> {
        Ok(self.sessions_where(user_id, |s| s.has_user_message).await)
    }

    async fn recent_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        Ok(self.sessions_where(user_id, |s| s.has_user_message && s.created_at >= cutoff).await)
    }

    async fn old_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        Ok(self.sessions_where(user_id, |s| s.has_user_message && s.created_at < cutoff).await)
    }

    async fn mark_user_message(&self, id: i64) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(&id) {
            Some(session) if !session.has_user_message => {
                session.has_user_message = true;
                session.updated_at = Utc::now();
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    async fn complete_session(&self, id: i64, summary: &str) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(&id) {
            Some(session) if !session.is_completed => {
                session.is_completed = true;
                session.summary = Some(summary.to_owned());
                session.updated_at = Utc::now();
                Ok(true)
            },
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl MessageStore for MemoryStorage {
    async fn create_message(&self, message: &NewMessage) -> Result<Message, StorageError> {
        let mut state = self.state.write().await;
        if !state.sessions.contains_key(&message.session_id) {
            return Err(StorageError::MissingReference(format!(
                "session {}",
                message.session_id
            )));
        }
        let stored = Message {
            id: next_id(&mut state.next_message_id),
            session_id: message.session_id,
            role: message.role,
            content: message.content.clone(),
            metadata: message.metadata.clone(),
            created_at: message.created_at,
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn get_session_messages(&self, session_id: i64) -> Result<Vec<Message>, StorageError> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> =
            state.messages.iter().filter(|m| m.session_id == session_id).cloned().collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}

#[async_trait]
impl ResultStore for MemoryStorage {
    async fn create_result(
        &self,
        result: &NewFortuneResult,
    ) -> Result<FortuneResult, StorageError> {
        let mut state = self.state.write().await;
        if !state.sessions.contains_key(&result.session_id) {
            return Err(StorageError::MissingReference(format!("session {}", result.session_id)));
        }
        if state.results.contains_key(&result.session_id) {
            return Err(StorageError::Duplicate(format!(
                "result for session {}",
                result.session_id
            )));
        }
        let stored = result.clone().into_result(next_id(&mut state.next_result_id));
        state.results.insert(stored.session_id, stored.clone());
        Ok(stored)
    }

    async fn get_result(&self, session_id: i64) -> Result<Option<FortuneResult>, StorageError> {
        Ok(self.state.read().await.results.get(&session_id).cloned())
    }
}
