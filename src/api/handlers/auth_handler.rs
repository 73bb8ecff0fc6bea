//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, Login, User};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Created;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<Created<User>> {
    let user = state.auth_service.register(payload).await?;
    Ok(Created(user))
}

/// Login and get JWT token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Login>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.login(payload).await?;
    Ok(Json(token))
}
