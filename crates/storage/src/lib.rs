//! Persistence gateway for the fortune chat service.
//!
//! Typed CRUD over five entities (users, profiles, sessions, messages,
//! results) with a PostgreSQL backend and a process-local in-memory backend,
//! selected at runtime through [`StorageBackend`].

mod backend;
mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
pub use traits::{MessageStore, ProfileStore, ResultStore, SessionStore, UserStore};
