//! Order and order line item handlers.
//!
//! Creating an order and attaching products are separate requests. Each
//! item attach stands alone: nothing ties a batch of them together.

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get, post},
    Router,
};

use crate::api::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateOrder, CreateOrderItem, Order, UpdateOrder};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, IdResponse, ListResponse, NoContent};

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
}

/// Create order line item routes
pub fn order_item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_order_item))
        .route("/:id", delete(remove_order_item))
}

pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrder>,
) -> AppResult<Created<Order>> {
    let orders = state.storage.orders();
    let id = orders.create(payload).await?;

    tracing::info!(order_id = %id, "Order created");
    Ok(Created(orders.get_by_id(id).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Order>> {
    Ok(Json(state.storage.orders().get_by_id(id).await?))
}

pub async fn list_orders(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<ListResponse<Order>>> {
    Ok(Json(state.storage.orders().get_list(&params).await?))
}

pub async fn update_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateOrder>,
) -> AppResult<Json<Order>> {
    let orders = state.storage.orders();
    if orders.update(id, payload).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(order_id = %id, "Order updated");
    Ok(Json(orders.get_by_id(id).await?))
}

/// Delete an order; fails with 400 while line items still reference it
pub async fn delete_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    if state.storage.orders().delete(id).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(order_id = %id, "Order deleted");
    Ok(NoContent)
}

/// Attach a product to an order
pub async fn add_order_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderItem>,
) -> AppResult<Created<IdResponse>> {
    let order_id = payload.order_id;
    let id = state.storage.orders().add_order_product(payload).await?;

    tracing::debug!(order_id = %order_id, item_id = %id, "Order item added");
    Ok(Created(IdResponse { id }))
}

pub async fn remove_order_item(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    if state.storage.orders().remove_order_item(id).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::debug!(item_id = %id, "Order item removed");
    Ok(NoContent)
}
