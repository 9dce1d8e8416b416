//! Generation client for the fortune chat service.
//!
//! [`LlmClient`] talks to an OpenAI-compatible chat-completions endpoint and
//! implements [`FortuneGenerator`], the seam the session orchestrator calls.

mod ai_types;
mod analysis;
mod client;
mod error;
mod generator;
mod prompts;


pub use ai_types::{ChatRequest, ChatResponse, Message, ResponseFormat};
pub use analysis::{parse_analysis, strip_markdown_json};
pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmClient, truncate};
pub use error::LlmError;
pub use generator::{ChatTurn, FortuneGenerator, REPLY_FALLBACK};
pub use prompts::{analysis_system_prompt, analysis_user_prompt, system_prompt};
