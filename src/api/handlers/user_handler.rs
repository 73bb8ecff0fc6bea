//! User handlers.
//!
//! Same full-row CRUD as the other resources; the password in the body is
//! hashed before it reaches storage.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ListResponse, NoContent};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<Created<User>> {
    let users = state.storage.users();
    let id = users.create(payload.into_new_user().await?).await?;

    tracing::info!(user_id = %id, "User created");
    Ok(Created(users.get_by_id(id).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<User>> {
    Ok(Json(state.storage.users().get_by_id(id).await?))
}

pub async fn list_users(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<ListResponse<User>>> {
    Ok(Json(state.storage.users().get_list(&params).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    let users = state.storage.users();
    let rows = users.update(id, payload.into_new_user().await?).await?;
    if rows == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(user_id = %id, "User updated");
    Ok(Json(users.get_by_id(id).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    let rows = state.storage.users().delete(id).await?;
    if rows == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok(NoContent)
}
