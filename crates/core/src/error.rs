use thiserror::Error;

/// Errors raised while parsing or validating core domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid message role: {0}")]
    InvalidRole(String),

    #[error("invalid gender: {0}")]
    InvalidGender(String),

    #[error("invalid birth date: {0}")]
    InvalidBirthDate(String),

    #[error("invalid birth time (expected HH:mm): {0}")]
    InvalidBirthTime(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, CoreError>;
