//! Product repository implementation.
//!
//! Every read joins the owning category with an inner join, so a product is
//! only visible together with its category.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{delete_by_id, paged, with_search};
use super::entities::category::Entity as CategoryEntity;
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use super::error::{FoundExt, StorageResult};
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::types::{ListParams, ListResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product. An unknown category is a foreign key violation.
    async fn create(&self, req: CreateProduct) -> StorageResult<Uuid>;

    /// Fetch one product with its category
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Product>;

    /// Page through products, searching by product name
    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Product>>;

    async fn update(&self, id: Uuid, req: UpdateProduct) -> StorageResult<u64>;

    async fn delete(&self, id: Uuid) -> StorageResult<u64>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Load products with their categories, keyed by product id.
///
/// Ids with no matching product (or whose category is gone) are absent
/// from the map.
pub async fn products_by_ids<C>(db: &C, ids: Vec<Uuid>) -> StorageResult<HashMap<Uuid, Product>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = ProductEntity::find()
        .inner_join(CategoryEntity)
        .select_also(CategoryEntity)
        .filter(product::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(product, category)| {
            category.map(|category| (product.id, product.with_category(category)))
        })
        .collect())
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn create(&self, req: CreateProduct) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = ActiveModel {
            id: Set(id),
            name: Set(req.name),
            category_id: Set(req.category_id),
            description: Set(req.description),
            price: Set(req.price),
            quantity: Set(req.quantity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        ProductEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Product> {
        let (product, category) = ProductEntity::find_by_id(id)
            .inner_join(CategoryEntity)
            .select_also(CategoryEntity)
            .one(&self.db)
            .await?
            .or_not_found()?;

        Ok(product.with_category(category.or_not_found()?))
    }

    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Product>> {
        let query = with_search(
            ProductEntity::find().inner_join(CategoryEntity),
            params,
            [(ProductEntity, product::Column::Name)],
        );

        let count = query.clone().count(&self.db).await?;
        let rows = paged(
            query
                .select_also(CategoryEntity)
                .order_by_asc(product::Column::CreatedAt)
                .order_by_asc(product::Column::Id),
            params,
        )
        .all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .filter_map(|(product, category)| {
                category.map(|category| product.with_category(category))
            })
            .collect();

        Ok(ListResponse::new(count, items))
    }

    async fn update(&self, id: Uuid, req: UpdateProduct) -> StorageResult<u64> {
        let changes = ActiveModel {
            id: NotSet,
            name: Set(req.name),
            category_id: Set(req.category_id),
            description: Set(req.description),
            price: Set(req.price),
            quantity: Set(req.quantity),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        };

        let result = ProductEntity::update_many()
            .set(changes)
            .filter(product::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<ProductEntity>(&self.db, id).await
    }
}
