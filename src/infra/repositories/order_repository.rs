//! Order repository implementation.
//!
//! Orders are read with their client (inner join) and their line items.
//! Line items for a page of orders are loaded with one extra query for the
//! join rows and one for the products, never one query per order.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{ColumnRef, IntoColumnRef};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{delete_by_id, paged, with_search};
use super::entities::client::{self, Entity as ClientEntity};
use super::entities::order::{self, ActiveModel, Entity as OrderEntity};
use super::entities::order_product::{self, Entity as OrderProductEntity};
use super::error::{FoundExt, StorageResult};
use super::product_repository::products_by_ids;
use crate::domain::{CreateOrder, CreateOrderItem, Order, OrderProduct, UpdateOrder};
use crate::types::{ListParams, ListResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order with no line items
    async fn create(&self, req: CreateOrder) -> StorageResult<Uuid>;

    /// Fetch one order with its client and line items
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Order>;

    /// Page through orders, searching status and client names
    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Order>>;

    async fn update(&self, id: Uuid, req: UpdateOrder) -> StorageResult<u64>;

    /// Hard delete; line items referencing the order block the delete
    async fn delete(&self, id: Uuid) -> StorageResult<u64>;

    /// Attach a product to an order, returning the line item id
    async fn add_order_product(&self, req: CreateOrderItem) -> StorageResult<Uuid>;

    /// Remove one line item by its own id
    async fn remove_order_item(&self, id: Uuid) -> StorageResult<u64>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Columns a free-text order search looks at
fn search_columns() -> [ColumnRef; 3] {
    [
        (OrderEntity, order::Column::Status).into_column_ref(),
        (ClientEntity, client::Column::FirstName).into_column_ref(),
        (ClientEntity, client::Column::LastName).into_column_ref(),
    ]
}

/// Load line items for the given orders, grouped by order id.
async fn items_by_order<C>(
    db: &C,
    order_ids: Vec<Uuid>,
) -> StorageResult<HashMap<Uuid, Vec<OrderProduct>>>
where
    C: ConnectionTrait,
{
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = OrderProductEntity::find()
        .filter(order_product::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_product::Column::CreatedAt)
        .order_by_asc(order_product::Column::Id)
        .all(db)
        .await?;

    let mut product_ids: Vec<Uuid> = rows.iter().map(|row| row.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let products = products_by_ids(db, product_ids).await?;

    let mut grouped: HashMap<Uuid, Vec<OrderProduct>> = HashMap::new();
    for row in rows {
        // Join semantics: a line item without its product is not shown
        let Some(product) = products.get(&row.product_id) else {
            continue;
        };
        grouped
            .entry(row.order_id)
            .or_default()
            .push(row.with_product(product.clone()));
    }

    Ok(grouped)
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn create(&self, req: CreateOrder) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = ActiveModel {
            id: Set(id),
            client_id: Set(req.client_id),
            price: Set(req.price),
            status: Set(req.status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        OrderEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Order> {
        let (order, client) = OrderEntity::find_by_id(id)
            .inner_join(ClientEntity)
            .select_also(ClientEntity)
            .one(&self.db)
            .await?
            .or_not_found()?;

        let mut order = order.with_client(client.or_not_found()?);
        let mut items = items_by_order(&self.db, vec![order.id]).await?;
        order.order_products = items.remove(&order.id).unwrap_or_default();

        Ok(order)
    }

    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Order>> {
        let query = with_search(
            OrderEntity::find().inner_join(ClientEntity),
            params,
            search_columns(),
        );

        let count = query.clone().count(&self.db).await?;
        let rows = paged(
            query
                .select_also(ClientEntity)
                .order_by_asc(order::Column::CreatedAt)
                .order_by_asc(order::Column::Id),
            params,
        )
        .all(&self.db)
        .await?;

        let mut orders: Vec<Order> = rows
            .into_iter()
            .filter_map(|(order, client)| client.map(|client| order.with_client(client)))
            .collect();

        let mut items =
            items_by_order(&self.db, orders.iter().map(|order| order.id).collect()).await?;
        for order in &mut orders {
            order.order_products = items.remove(&order.id).unwrap_or_default();
        }

        Ok(ListResponse::new(count, orders))
    }

    async fn update(&self, id: Uuid, req: UpdateOrder) -> StorageResult<u64> {
        let changes = ActiveModel {
            id: NotSet,
            client_id: Set(req.client_id),
            price: Set(req.price),
            status: Set(req.status),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        };

        let result = OrderEntity::update_many()
            .set(changes)
            .filter(order::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<OrderEntity>(&self.db, id).await
    }

    async fn add_order_product(&self, req: CreateOrderItem) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = order_product::ActiveModel {
            id: Set(id),
            order_id: Set(req.order_id),
            product_id: Set(req.product_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        OrderProductEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn remove_order_item(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<OrderProductEntity>(&self.db, id).await
    }
}
