use base_entity_derive::base_entity;
use sea_orm::{IntoActiveModel, Set, entity::prelude::*};

pub type TodoId = i64;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    pub title: String,
    pub description: Option<String>,
    #[sea_orm(default_value = false)]
    pub completed: bool,
}

impl ActiveModelBehavior for ActiveModel {}

/// The caller-controlled state of a todo. Create inserts it as a new row;
/// update replaces every mutable column with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn apply_to(self, active: &mut ActiveModel) {
        active.title = Set(self.title);
        active.description = Set(self.description);
        active.completed = Set(self.completed);
    }
}

impl IntoActiveModel<ActiveModel> for TodoDraft {
    fn into_active_model(self) -> ActiveModel {
        let mut active = ActiveModel {
            ..Default::default()
        };
        self.apply_to(&mut active);
        active
    }
}
