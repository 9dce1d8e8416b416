//! Applies the PostgreSQL schema. Safe to run repeatedly.

use fortune_storage::StorageBackend;

pub(crate) async fn run() -> anyhow::Result<()> {
    let url = crate::require_database_url()?;
    let backend = StorageBackend::new_postgres(&url).await?;
    tracing::info!(backend = backend.kind(), "schema is up to date");
    println!("Migrations applied.");
    Ok(())
}
