//! Storage backend trait abstraction
//!
//! Defines async domain traits for the five persisted entities. Both
//! `PgStorage` and `MemoryStorage` implement every trait; `StorageBackend`
//! dispatches between them.

pub mod identity;
pub mod result;
pub mod session;

pub use identity::{ProfileStore, UserStore};
pub use result::ResultStore;
pub use session::{MessageStore, SessionStore};
