//! Errors raised by the persistence gateway.
//!
//! Constraint violations are classified up front so the service layer can
//! react to a duplicate result or a missing user without inspecting SQL codes.

use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum StorageError {
    /// An update or lookup addressed a row that does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint hit (second result for a session, reused email, second profile).
    #[error("already exists: {0}")]
    Duplicate(String),

    /// The row points at a parent that is not there (message for an unknown session).
    #[error("missing reference: {0}")]
    MissingReference(String),

    #[error("postgres: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored value no longer maps onto the domain type (bad enum text, malformed JSON).
    #[error("corrupt row: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("schema migration failed: {0}")]
    Migration(String),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let code = err.as_database_error().and_then(|db| db.code()).map(|c| c.into_owned());
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => Self::Duplicate(constraint_message(&err)),
            Some(FOREIGN_KEY_VIOLATION) => Self::MissingReference(constraint_message(&err)),
            _ => Self::Database(err),
        }
    }
}

fn constraint_message(err: &sqlx::Error) -> String {
    err.as_database_error()
        .map_or_else(|| err.to_string(), |db| db.message().to_owned())
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption { context: "json column".to_owned(), source: Box::new(err) }
    }
}
