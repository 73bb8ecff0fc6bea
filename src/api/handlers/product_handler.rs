//! Product handlers.
//!
//! Responses always embed the product's category as `category_data`.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ListResponse, NoContent};

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProduct>,
) -> AppResult<Created<Product>> {
    let products = state.storage.products();
    let id = products.create(payload).await?;

    tracing::info!(product_id = %id, "Product created");
    Ok(Created(products.get_by_id(id).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Product>> {
    Ok(Json(state.storage.products().get_by_id(id).await?))
}

pub async fn list_products(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<ListResponse<Product>>> {
    Ok(Json(state.storage.products().get_list(&params).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let products = state.storage.products();
    if products.update(id, payload).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(products.get_by_id(id).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    if state.storage.products().delete(id).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(product_id = %id, "Product deleted");
    Ok(NoContent)
}
