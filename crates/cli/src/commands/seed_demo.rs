use std::sync::Arc;

use fortune_llm::LlmClient;
use fortune_service::FortuneService;
use fortune_storage::StorageBackend;

pub(crate) async fn run(user_id: &str) -> anyhow::Result<()> {
    let url = crate::require_database_url()?;
    let storage = Arc::new(StorageBackend::new_postgres(&url).await?);
    // Seeding never calls the model, so the key may be absent.
    let api_key = crate::get_api_key().unwrap_or_default();
    let llm = Arc::new(LlmClient::new(api_key, crate::get_base_url())?);
    let service = FortuneService::new(storage, llm);

    let report = service.seed_demo_data(user_id).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
