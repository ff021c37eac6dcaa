use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityName, EntityTrait, FromQueryResult,
    IntoActiveModel, QueryFilter, QueryOrder, Select,
};

use super::base_traits::{BaseEntityColumns, SoftDeleteActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// CRUD over a soft-deletable table. Every read goes through [`DaoBase::live`],
/// so rows with `deleted_at` set are invisible to callers.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + TimestampedActiveModel
        + SoftDeleteActiveModel
        + Send,
    Self::Entity: BaseEntityColumns,
{
    type Entity: EntityTrait + Send + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn entity_name() -> &'static str {
        Self::Entity::default().table_name()
    }

    fn live() -> Select<Self::Entity> {
        Self::Entity::find().filter(Self::Entity::deleted_at_column().is_null())
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_created_at(now);
        active.set_updated_at(now);
        active.set_deleted_at(None);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_all(&self) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        Self::live()
            .order_by_asc(Self::Entity::id_column())
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let model = Self::live()
            .filter(Self::Entity::id_column().eq(id))
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::entity_name(),
            id,
        })
    }

    async fn update<F>(&self, id: i64, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        // Only columns marked Set are written, and only while the row is live.
        let result = Self::Entity::update_many()
            .set(active)
            .filter(Self::Entity::id_column().eq(id))
            .filter(Self::Entity::deleted_at_column().is_null())
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            });
        }

        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: i64) -> DaoResult<()> {
        let now = Utc::now().fixed_offset();
        let result = Self::Entity::update_many()
            .col_expr(Self::Entity::deleted_at_column(), Expr::value(now))
            .filter(Self::Entity::id_column().eq(id))
            .filter(Self::Entity::deleted_at_column().is_null())
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NoRowsAffected {
                entity: Self::entity_name(),
                id,
            });
        }

        Ok(())
    }
}
