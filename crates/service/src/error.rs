//! Typed error enum for the service layer.
//!
//! Unifies storage, generation and validation failures so the HTTP layer can
//! map each one to a status code without downcasting.

use fortune_core::CoreError;
use fortune_llm::LlmError;
use fortune_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, duplicate, missing reference).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Reply or analysis generation failed.
    #[error("generation: {0}")]
    Generation(#[from] LlmError),

    /// Caller provided invalid input (blank text, malformed profile data).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Requester does not own the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Operation conflicts with the current state (message to a completed session).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Storage(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
