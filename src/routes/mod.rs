use std::sync::Arc;

use axum::{Router, middleware};

use crate::{
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

pub mod api;
pub mod extract;

pub use api::router;

/// The router with the JSON error normalization and panic catching every
/// deployment needs. Request tracing is layered on top by the binary.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}
