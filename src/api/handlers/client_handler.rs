//! Client handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Client, CreateClient, UpdateClient};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ListResponse, NoContent};

/// Create client routes
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateClient>,
) -> AppResult<Created<Client>> {
    let clients = state.storage.clients();
    let id = clients.create(payload).await?;

    tracing::info!(client_id = %id, "Client created");
    Ok(Created(clients.get_by_id(id).await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Client>> {
    Ok(Json(state.storage.clients().get_by_id(id).await?))
}

pub async fn list_clients(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<ListResponse<Client>>> {
    Ok(Json(state.storage.clients().get_list(&params).await?))
}

pub async fn update_client(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateClient>,
) -> AppResult<Json<Client>> {
    let clients = state.storage.clients();
    if clients.update(id, payload).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(client_id = %id, "Client updated");
    Ok(Json(clients.get_by_id(id).await?))
}

pub async fn delete_client(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<NoContent> {
    if state.storage.clients().delete(id).await? == 0 {
        return Err(AppError::no_rows_affected());
    }

    tracing::info!(client_id = %id, "Client deleted");
    Ok(NoContent)
}
