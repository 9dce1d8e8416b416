//! Core types and constants for the fortune chat service
//!
//! This crate contains domain types shared across all other crates.

pub mod constants;
mod env_config;
mod error;
mod fortune_type;
mod message;
mod profile;
mod result;
mod session;
mod user;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use fortune_type::*;
pub use message::*;
pub use profile::*;
pub use result::*;
pub use session::*;
pub use user::*;
