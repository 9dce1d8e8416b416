//! Shared constants for the fortune chat service.
//!
//! Centralizes magic numbers and fixed texts used across crates.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Window separating "recent" from "old" sessions when the caller gives none.
pub const DEFAULT_RECENT_HOURS: i64 = 24;

/// Upper bound for a session time window (ten years).
pub const MAX_WINDOW_HOURS: i64 = 24 * 365 * 10;

/// Timeout applied to every generation request.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Lowest score an analysis may carry.
pub const SCORE_MIN: i32 = 1;

/// Highest score an analysis may carry.
pub const SCORE_MAX: i32 = 100;

/// Summary stored when a casual conversation is completed.
pub const CASUAL_SUMMARY: &str = "이야기 - 좋은 시간이었어요";

/// Ack returned to the client after a session is completed.
pub const COMPLETION_ACK: &str = "운세 상담이 완료되었습니다.";

/// Metadata `kind` marking the canned greeting that opens every session.
pub const GREETING_KIND: &str = "greeting";
