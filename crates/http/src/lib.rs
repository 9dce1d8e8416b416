//! HTTP API server for fortune consultation sessions.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod extract;
mod handlers;
mod query_types;
mod requester;
mod response_types;

use axum::{
    Json, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fortune_service::{FortuneService, ProfileService};

pub use requester::{Requester, USER_ID_HEADER};
pub use response_types::{CompletionAck, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Session lifecycle orchestration
    pub fortune: Arc<FortuneService>,
    /// User and profile management
    pub profiles: Arc<ProfileService>,
    /// Default window for `/recent` and `/old` when `hours` is omitted
    pub recent_hours: i64,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/auth/user", get(handlers::users::get_user).put(handlers::users::upsert_user))
        .route(
            "/api/profile",
            get(handlers::users::get_profile).post(handlers::users::save_profile),
        )
        .route(
            "/api/fortune/sessions",
            get(handlers::sessions::list_sessions).post(handlers::sessions::start_session),
        )
        .route("/api/fortune/sessions/recent", get(handlers::sessions::recent_sessions))
        .route("/api/fortune/sessions/old", get(handlers::sessions::old_sessions))
        .route("/api/fortune/sessions/{id}", get(handlers::sessions::get_session))
        .route("/api/fortune/sessions/{id}/messages", post(handlers::sessions::send_message))
        .route("/api/fortune/sessions/{id}/complete", post(handlers::sessions::complete_session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
