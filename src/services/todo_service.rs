use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::dao::TodoRepository,
    db::entities::{Todo, TodoDraft, TodoId},
    services::error::ServiceResult,
};

/// Use cases exposed to the HTTP layer.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn get_all_todos(&self) -> ServiceResult<Vec<Todo>>;
    async fn get_todo_by_id(&self, id: TodoId) -> ServiceResult<Todo>;
    async fn create_todo(&self, draft: TodoDraft) -> ServiceResult<Todo>;
    async fn update_todo(&self, id: TodoId, draft: TodoDraft) -> ServiceResult<Todo>;
    async fn delete_todo(&self, id: TodoId) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl {
    repo: Arc<dyn TodoRepository>,
}

impl TodoServiceImpl {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TodoService for TodoServiceImpl {
    async fn get_all_todos(&self) -> ServiceResult<Vec<Todo>> {
        Ok(self.repo.find_all().await?)
    }

    async fn get_todo_by_id(&self, id: TodoId) -> ServiceResult<Todo> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn create_todo(&self, draft: TodoDraft) -> ServiceResult<Todo> {
        Ok(self.repo.create(draft).await?)
    }

    async fn update_todo(&self, id: TodoId, draft: TodoDraft) -> ServiceResult<Todo> {
        Ok(self.repo.update(id, draft).await?)
    }

    // Looked up first so a missing id surfaces as NotFound rather than a
    // failed write. The two statements are not wrapped in a transaction.
    async fn delete_todo(&self, id: TodoId) -> ServiceResult<()> {
        let todo = self.repo.find_by_id(id).await?;
        self.repo.delete(&todo).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use chrono::Utc;
    use sea_orm::DbErr;

    use super::{TodoService, TodoServiceImpl};
    use crate::{
        db::dao::{DaoLayerError, DaoResult, TodoRepository},
        db::entities::{Todo, TodoDraft, TodoId},
        services::ServiceError,
    };

    #[derive(Default)]
    struct InMemoryTodoRepository {
        rows: Mutex<Vec<Todo>>,
        delete_calls: AtomicUsize,
        fail_reads: bool,
    }

    impl InMemoryTodoRepository {
        fn not_found(id: TodoId) -> DaoLayerError {
            DaoLayerError::NotFound {
                entity: "todos",
                id,
            }
        }

        fn live(&self) -> Vec<Todo> {
            self.rows
                .lock()
                .expect("rows lock")
                .iter()
                .filter(|todo| todo.deleted_at.is_none())
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl TodoRepository for InMemoryTodoRepository {
        async fn find_all(&self) -> DaoResult<Vec<Todo>> {
            if self.fail_reads {
                return Err(DaoLayerError::Db(DbErr::Custom("offline".to_string())));
            }
            Ok(self.live())
        }

        async fn find_by_id(&self, id: TodoId) -> DaoResult<Todo> {
            if self.fail_reads {
                return Err(DaoLayerError::Db(DbErr::Custom("offline".to_string())));
            }
            self.live()
                .into_iter()
                .find(|todo| todo.id == id)
                .ok_or_else(|| Self::not_found(id))
        }

        async fn create(&self, draft: TodoDraft) -> DaoResult<Todo> {
            let mut rows = self.rows.lock().expect("rows lock");
            let now = Utc::now().fixed_offset();
            let todo = Todo {
                id: rows.len() as TodoId + 1,
                created_at: now,
                updated_at: now,
                deleted_at: None,
                title: draft.title,
                description: draft.description,
                completed: draft.completed,
            };
            rows.push(todo.clone());
            Ok(todo)
        }

        async fn update(&self, id: TodoId, draft: TodoDraft) -> DaoResult<Todo> {
            let mut rows = self.rows.lock().expect("rows lock");
            let todo = rows
                .iter_mut()
                .find(|todo| todo.id == id && todo.deleted_at.is_none())
                .ok_or_else(|| Self::not_found(id))?;
            todo.title = draft.title;
            todo.description = draft.description;
            todo.completed = draft.completed;
            todo.updated_at = Utc::now().fixed_offset();
            Ok(todo.clone())
        }

        async fn delete(&self, todo: &Todo) -> DaoResult<()> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().expect("rows lock");
            let row = rows
                .iter_mut()
                .find(|row| row.id == todo.id && row.deleted_at.is_none())
                .ok_or(DaoLayerError::NoRowsAffected {
                    entity: "todos",
                    id: todo.id,
                })?;
            row.deleted_at = Some(Utc::now().fixed_offset());
            Ok(())
        }
    }

    fn service(repo: &Arc<InMemoryTodoRepository>) -> TodoServiceImpl {
        TodoServiceImpl::new(repo.clone())
    }

    #[tokio::test]
    async fn get_all_todos_returns_every_live_todo() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let service = service(&repo);
        service
            .create_todo(TodoDraft::new("Task 1"))
            .await
            .expect("create");
        service
            .create_todo(TodoDraft::new("Task 2"))
            .await
            .expect("create");

        let todos = service.get_all_todos().await.expect("list");

        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Task 1");
    }

    #[tokio::test]
    async fn created_todo_can_be_read_back() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let service = service(&repo);
        let draft = TodoDraft {
            title: "Write report".to_string(),
            description: Some("quarterly".to_string()),
            completed: true,
        };

        let created = service.create_todo(draft.clone()).await.expect("create");
        let fetched = service.get_todo_by_id(created.id).await.expect("fetch");

        assert_ne!(created.id, 0);
        assert_eq!(fetched.title, draft.title);
        assert_eq!(fetched.description, draft.description);
        assert_eq!(fetched.completed, draft.completed);
    }

    #[tokio::test]
    async fn get_todo_by_id_reports_not_found() {
        let repo = Arc::new(InMemoryTodoRepository::default());

        let err = service(&repo)
            .get_todo_by_id(1)
            .await
            .expect_err("lookup should fail");

        assert!(matches!(err, ServiceError::NotFound { id: 1 }));
    }

    #[tokio::test]
    async fn delete_todo_skips_delete_when_todo_is_missing() {
        let repo = Arc::new(InMemoryTodoRepository::default());

        let err = service(&repo)
            .delete_todo(99)
            .await
            .expect_err("delete should fail");

        assert!(matches!(err, ServiceError::NotFound { id: 99 }));
        assert_eq!(repo.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deleted_todo_disappears_from_reads() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let service = service(&repo);
        let keep = service
            .create_todo(TodoDraft::new("keep"))
            .await
            .expect("create");
        let gone = service
            .create_todo(TodoDraft::new("gone"))
            .await
            .expect("create");

        service.delete_todo(gone.id).await.expect("delete");

        assert_eq!(repo.delete_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            service.get_todo_by_id(gone.id).await,
            Err(ServiceError::NotFound { .. })
        ));
        let ids: Vec<TodoId> = service
            .get_all_todos()
            .await
            .expect("list")
            .iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[tokio::test]
    async fn update_todo_replaces_every_field() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let service = service(&repo);
        let created = service
            .create_todo(TodoDraft {
                title: "draft".to_string(),
                description: Some("old".to_string()),
                completed: false,
            })
            .await
            .expect("create");

        let updated = service
            .update_todo(created.id, TodoDraft::new("final"))
            .await
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "final");
        assert_eq!(updated.description, None);
        assert!(!updated.completed);
    }

    #[tokio::test]
    async fn update_todo_of_missing_id_is_not_found() {
        let repo = Arc::new(InMemoryTodoRepository::default());

        let err = service(&repo)
            .update_todo(3, TodoDraft::new("ghost"))
            .await
            .expect_err("update should fail");

        assert!(matches!(err, ServiceError::NotFound { id: 3 }));
        assert!(repo.live().is_empty());
    }

    #[tokio::test]
    async fn store_failures_pass_through_as_store_errors() {
        let repo = Arc::new(InMemoryTodoRepository {
            fail_reads: true,
            ..Default::default()
        });

        let err = service(&repo)
            .get_all_todos()
            .await
            .expect_err("list should fail");

        assert!(matches!(err, ServiceError::Store(DaoLayerError::Db(_))));
    }
}
