use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{health, todos};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(todos::router(state))
}
