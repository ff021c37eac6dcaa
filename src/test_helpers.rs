use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes,
    services::TodoService,
    state::AppState,
};

/// Default config pointed at a private in-memory SQLite database.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    }
}

/// Full application over a fresh in-memory SQLite database with the schema
/// already synced.
pub async fn sqlite_app() -> anyhow::Result<Router> {
    let cfg = test_config();
    let db = connection::connect(&cfg.database).await?;
    Ok(routes::app(AppState::from_db(cfg, &db)))
}

/// Full application over an arbitrary service, no database involved.
pub fn app_with_service(todos: Arc<dyn TodoService>) -> Router {
    routes::app(AppState::new(test_config(), todos))
}
