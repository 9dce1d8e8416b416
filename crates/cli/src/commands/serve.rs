use anyhow::Result;
use fortune_core::{
    DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_RECENT_HOURS, MAX_WINDOW_HOURS, env_parse_with_default,
};
use fortune_http::{AppState, create_router};
use fortune_llm::LlmClient;
use fortune_service::{FortuneService, ProfileService};
use fortune_storage::StorageBackend;
use std::sync::Arc;
use std::time::Duration;

use crate::{get_api_key, get_base_url, get_database_url, get_model};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let api_key = get_api_key()?;
    let timeout_secs = env_parse_with_default("FORTUNE_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS);
    let llm = LlmClient::new(api_key, get_base_url())?
        .with_model(get_model())
        .with_timeout(Duration::from_secs(timeout_secs))?;
    tracing::info!(
        model = llm.model(),
        base_url = llm.base_url(),
        timeout_secs,
        "LLM client ready"
    );

    let storage = match get_database_url() {
        Some(url) => Arc::new(StorageBackend::new_postgres(&url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            Arc::new(StorageBackend::new_memory())
        },
    };

    let mut recent_hours = env_parse_with_default("FORTUNE_RECENT_HOURS", DEFAULT_RECENT_HOURS);
    if !(1..=MAX_WINDOW_HOURS).contains(&recent_hours) {
        tracing::warn!(recent_hours, "FORTUNE_RECENT_HOURS out of range, using default");
        recent_hours = DEFAULT_RECENT_HOURS;
    }

    let state = Arc::new(AppState {
        fortune: Arc::new(FortuneService::new(Arc::clone(&storage), Arc::new(llm))),
        profiles: Arc::new(ProfileService::new(Arc::clone(&storage))),
        recent_hours,
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(backend = storage.kind(), "Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
