//! Category handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Category, CreateCategory, UpdateCategory};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ListResponse, NoContent};

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategory>,
) -> AppResult<Created<Category>> {
    let categories = state.storage.categories();
    let id = categories.create(payload).await?;

    tracing::info!(category_id = %id, "Category created");
    Ok(Created(categories.get_by_id(id).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Category>> {
    Ok(Json(state.storage.categories().get_by_id(id).await?))
}

pub async fn list_categories(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<ListResponse<Category>>> {
    Ok(Json(state.storage.categories().get_list(&params).await?))
}

pub async fn update_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let categories = state.storage.categories();
    if categories.update(id, payload).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(categories.get_by_id(id).await?))
}

/// Delete a category; fails with 400 while products still reference it
pub async fn delete_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    if state.storage.categories().delete(id).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(category_id = %id, "Category deleted");
    Ok(NoContent)
}
