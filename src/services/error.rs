use crate::db::{dao::DaoLayerError, entities::TodoId};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("todo not found (id={id})")]
    NotFound { id: TodoId },
    #[error(transparent)]
    Store(DaoLayerError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DaoLayerError> for ServiceError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { id, .. } => ServiceError::NotFound { id },
            other => ServiceError::Store(other),
        }
    }
}
