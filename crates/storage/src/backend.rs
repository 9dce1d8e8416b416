//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use fortune_core::{
    FortuneResult, Message, NewFortuneResult, NewMessage, NewSession, Profile, ProfileInput,
    Session, User, UserUpsert,
};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{MessageStore, ProfileStore, ResultStore, SessionStore, UserStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── UserStore ──

#[async_trait]
impl UserStore for StorageBackend {
    async fn upsert_user(&self, user: &UserUpsert) -> Result<User, StorageError> {
        dispatch!(self, UserStore, upsert_user(user))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        dispatch!(self, UserStore, get_user(id))
    }
}

// ── ProfileStore ──

#[async_trait]
impl ProfileStore for StorageBackend {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StorageError> {
        dispatch!(self, ProfileStore, get_profile(user_id))
    }

    async fn create_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        dispatch!(self, ProfileStore, create_profile(user_id, input))
    }

    async fn update_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<Profile, StorageError> {
        dispatch!(self, ProfileStore, update_profile(user_id, input))
    }
}

// ── SessionStore ──

#[async_trait]
impl SessionStore for StorageBackend {
    async fn create_session(&self, session: &NewSession) -> Result<Session, StorageError> {
        dispatch!(self, SessionStore, create_session(session))
    }

    async fn get_session(&self, id: i64) -> Result<Option<Session>, StorageError> {
        dispatch!(self, SessionStore, get_session(id))
    }

    async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<Session>, StorageError> {
        dispatch!(self, SessionStore, list_user_sessions(user_id))
    }

    async fn recent_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        dispatch!(self, SessionStore, recent_user_sessions(user_id, hours))
    }

    async fn old_user_sessions(
        &self,
        user_id: &str,
        hours: i64,
    ) -> Result<Vec<Session>, StorageError> {
        dispatch!(self, SessionStore, old_user_sessions(user_id, hours))
    }

    async fn mark_user_message(&self, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, SessionStore, mark_user_message(id))
    }

    async fn complete_session(&self, id: i64, summary: &str) -> Result<bool, StorageError> {
        dispatch!(self, SessionStore, complete_session(id, summary))
    }
}

// ── MessageStore ──

#[async_trait]
impl MessageStore for StorageBackend {
    async fn create_message(&self, message: &NewMessage) -> Result<Message, StorageError> {
        dispatch!(self, MessageStore, create_message(message))
    }

    async fn get_session_messages(&self, session_id: i64) -> Result<Vec<Message>, StorageError> {
        dispatch!(self, MessageStore, get_session_messages(session_id))
    }
}

// ── ResultStore ──

#[async_trait]
impl ResultStore for StorageBackend {
    async fn create_result(
        &self,
        result: &NewFortuneResult,
    ) -> Result<FortuneResult, StorageError> {
        dispatch!(self, ResultStore, create_result(result))
    }

    async fn get_result(&self, session_id: i64) -> Result<Option<FortuneResult>, StorageError> {
        dispatch!(self, ResultStore, get_result(session_id))
    }
}
