use std::any::Any;

use axum::{http::StatusCode, response::Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::ErrorBody, logging::panic_message};

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_json as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    let error = if cfg!(debug_assertions) {
        format!("internal server error: {}", panic_message(panic.as_ref()))
    } else {
        "internal server error".to_string()
    };

    ErrorBody { error }.into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
