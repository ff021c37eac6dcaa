use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{Todo, TodoDraft, TodoId},
    error::AppError,
    routes::extract::{JsonBody, TodoIdPath},
    services::ServiceError,
    state::AppState,
};

pub const NOT_FOUND_MESSAGE: &str = "Todo não encontrado";
pub const DELETED_MESSAGE: &str = "Todo deletado com sucesso";

/// Body of create and update. Omitted fields take their zero value, so an
/// update replaces the whole record. Unknown fields, `id` included, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoPayload {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TodoPayload> for TodoDraft {
    fn from(payload: TodoPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TodoOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl TodoOp {
    fn failure_message(self) -> &'static str {
        match self {
            TodoOp::List => "Erro ao buscar todos os todos",
            TodoOp::Get => "Erro ao buscar o todo",
            TodoOp::Create => "Erro ao criar o todo",
            TodoOp::Update => "Erro ao atualizar o todo",
            TodoOp::Delete => "Erro ao deletar o todo",
        }
    }
}

fn map_service_error(op: TodoOp, err: ServiceError) -> AppError {
    match err {
        ServiceError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        ServiceError::Store(source) => {
            tracing::error!(op = ?op, error = %source, "todo store failure");
            AppError::internal(op.failure_message())
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state
        .todos
        .get_all_todos()
        .await
        .map_err(|err| map_service_error(TodoOp::List, err))?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoIdPath(id): TodoIdPath,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state
        .todos
        .get_todo_by_id(id)
        .await
        .map_err(|err| map_service_error(TodoOp::Get, err))?;
    Ok(Json(todo.into()))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = state
        .todos
        .create_todo(payload.into())
        .await
        .map_err(|err| map_service_error(TodoOp::Create, err))?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoIdPath(id): TodoIdPath,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state
        .todos
        .update_todo(id, payload.into())
        .await
        .map_err(|err| map_service_error(TodoOp::Update, err))?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoIdPath(id): TodoIdPath,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .todos
        .delete_todo(id)
        .await
        .map_err(|err| map_service_error(TodoOp::Delete, err))?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::{NOT_FOUND_MESSAGE, TodoOp, TodoPayload, map_service_error};
    use crate::{db::dao::DaoLayerError, db::entities::TodoDraft, services::ServiceError};

    #[test]
    fn payload_defaults_missing_fields() {
        let payload: TodoPayload =
            serde_json::from_str(r#"{"title":"Task 1","id":42,"extra":true}"#)
                .expect("payload should decode");
        let draft = TodoDraft::from(payload);

        assert_eq!(draft, TodoDraft::new("Task 1"));
    }

    #[test]
    fn not_found_maps_to_the_same_message_for_every_operation() {
        for op in [TodoOp::Get, TodoOp::Update, TodoOp::Delete] {
            let err = map_service_error(op, ServiceError::NotFound { id: 7 });
            assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
            assert_eq!(err.message(), NOT_FOUND_MESSAGE);
        }
    }

    #[test]
    fn store_failures_use_the_operation_message() {
        let err = map_service_error(
            TodoOp::Delete,
            ServiceError::Store(DaoLayerError::NoRowsAffected {
                entity: "todos",
                id: 1,
            }),
        );
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Erro ao deletar o todo");

        let err = map_service_error(
            TodoOp::List,
            ServiceError::Store(DaoLayerError::Db(DbErr::Custom("down".to_string()))),
        );
        assert_eq!(err.message(), "Erro ao buscar todos os todos");
    }
}
