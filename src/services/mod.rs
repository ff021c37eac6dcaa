pub mod context;
pub mod error;
pub mod todo_service;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use todo_service::{TodoService, TodoServiceImpl};
