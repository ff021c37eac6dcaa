use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::{entities::prelude::Todos, providers};
use crate::config::DatabaseConfig;

/// Opens the pool for the configured url and brings the schema in line with
/// the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = providers::provider_for_url(&cfg.url)?;
    let db = provider
        .connect(cfg)
        .await
        .with_context(|| format!("failed to connect to {} database", provider.id().as_str()))?;
    provider.post_connect(&db).await?;

    info!(backend = provider.id().as_str(), "syncing database schema from entities");
    db.get_schema_builder()
        .register(Todos)
        .sync(&db)
        .await
        .context("failed to sync database schema")?;
    Ok(db)
}
