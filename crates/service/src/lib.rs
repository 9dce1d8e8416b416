//! Service layer for the fortune chat backend.
//!
//! Centralizes the session lifecycle and profile rules between the HTTP
//! handlers and the storage/generation crates.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod demo;
mod error;
mod fortune_service;
mod profile_service;

#[cfg(test)]
mod test_support;

pub use demo::DemoSeedReport;
pub use error::ServiceError;
pub use fortune_service::{CompletionOutcome, FortuneService, SessionDetail};
pub use profile_service::{ProfileService, UserWithProfile};
