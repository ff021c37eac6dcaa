use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{db::dao::DaoContext, services::todo_service::TodoServiceImpl};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn todo(&self) -> TodoServiceImpl {
        TodoServiceImpl::new(Arc::new(self.daos.todo()))
    }
}
