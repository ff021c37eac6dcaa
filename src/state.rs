use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::ServiceContext, services::TodoService};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub todos: Arc<dyn TodoService>,
}

impl AppState {
    pub fn new(config: AppConfig, todos: Arc<dyn TodoService>) -> Arc<Self> {
        Arc::new(Self { config, todos })
    }

    /// Wires connection -> DAO -> service.
    pub fn from_db(config: AppConfig, db: &DatabaseConnection) -> Arc<Self> {
        let todos = ServiceContext::new(db).todo();
        Self::new(config, Arc::new(todos))
    }
}
