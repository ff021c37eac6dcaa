use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{db::entities::TodoId, error::AppError, routes::api::todos::NOT_FOUND_MESSAGE};

pub const INVALID_ID_MESSAGE: &str = "ID inválido";

/// `{id}` path segment as a todo id. Non-numeric and negative ids are
/// rejected with 400; numeric ids too large to be stored cannot match a row
/// and are reported as 404.
#[derive(Debug, Clone, Copy)]
pub struct TodoIdPath(pub TodoId);

impl TodoIdPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<TodoId>() {
            Ok(id) if id >= 0 => Ok(Self(id)),
            _ if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                Err(AppError::not_found(NOT_FOUND_MESSAGE))
            }
            _ => Err(AppError::bad_request(INVALID_ID_MESSAGE)),
        }
    }
}

impl<S> FromRequestParts<S> for TodoIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_ID_MESSAGE))?;
        Self::parse(&raw)
    }
}

/// JSON request body. Every decode failure (syntax, shape, content type)
/// becomes a 400 carrying the decoder's message.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}
