use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Todos;
use crate::db::entities::{Todo, TodoDraft, TodoId};

/// Persistence contract the todo service is written against.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every live todo, oldest first.
    async fn find_all(&self) -> DaoResult<Vec<Todo>>;

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Todo>;

    async fn create(&self, draft: TodoDraft) -> DaoResult<Todo>;

    /// Replaces title, description and completed of an existing todo.
    /// Missing or deleted ids fail with `NotFound`; nothing is inserted.
    async fn update(&self, id: TodoId, draft: TodoDraft) -> DaoResult<Todo>;

    /// Soft-deletes the given record.
    async fn delete(&self, todo: &Todo) -> DaoResult<()>;
}

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todos;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl TodoRepository for TodoDao {
    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        DaoBase::find_all(self).await
    }

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Todo> {
        DaoBase::find_by_id(self, id).await
    }

    async fn create(&self, draft: TodoDraft) -> DaoResult<Todo> {
        DaoBase::create(self, draft).await
    }

    async fn update(&self, id: TodoId, draft: TodoDraft) -> DaoResult<Todo> {
        DaoBase::update(self, id, move |active| draft.apply_to(active)).await
    }

    async fn delete(&self, todo: &Todo) -> DaoResult<()> {
        self.soft_delete(todo.id).await
    }
}
