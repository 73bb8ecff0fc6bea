//! Category repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{delete_by_id, paged, with_search};
use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use super::error::{FoundExt, StorageResult};
use crate::domain::{Category, CreateCategory, UpdateCategory};
use crate::types::{ListParams, ListResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category, returning its generated id
    async fn create(&self, req: CreateCategory) -> StorageResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Category>;

    /// Page through categories, optionally filtered by name
    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Category>>;

    /// Full-row update, returning rows affected
    async fn update(&self, id: Uuid, req: UpdateCategory) -> StorageResult<u64>;

    /// Hard delete, returning rows affected
    async fn delete(&self, id: Uuid) -> StorageResult<u64>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn create(&self, req: CreateCategory) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = ActiveModel {
            id: Set(id),
            name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        CategoryEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Category> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .or_not_found()?;

        Ok(Category::from(model))
    }

    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Category>> {
        let query = with_search(
            CategoryEntity::find(),
            params,
            [(CategoryEntity, category::Column::Name)],
        );

        let count = query.clone().count(&self.db).await?;
        let models = paged(
            query
                .order_by_asc(category::Column::CreatedAt)
                .order_by_asc(category::Column::Id),
            params,
        )
        .all(&self.db)
        .await?;

        Ok(ListResponse::new(
            count,
            models.into_iter().map(Category::from).collect(),
        ))
    }

    async fn update(&self, id: Uuid, req: UpdateCategory) -> StorageResult<u64> {
        let changes = ActiveModel {
            id: NotSet,
            name: Set(req.name),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        };

        let result = CategoryEntity::update_many()
            .set(changes)
            .filter(category::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<CategoryEntity>(&self.db, id).await
    }
}
