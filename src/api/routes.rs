//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{
    auth_routes, category_routes, client_routes, order_item_routes, order_routes,
    product_routes, user_routes,
};
use super::middleware::auth_middleware;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let resources = Router::new()
        .nest("/user", user_routes())
        .nest("/category", category_routes())
        .nest("/client", client_routes())
        .nest("/product", product_routes())
        .nest("/order", order_routes())
        .nest("/order_item", order_item_routes());

    // Token check is opt-in; `/`, `/health`, `/register` and `/login` stay open
    let resources = if state.config.require_auth {
        resources.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    } else {
        resources
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(resources)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Order API is running"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

/// Health check endpoint; 503 when the database does not answer
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => {
            tracing::warn!("Health check database ping failed: {:?}", e);
            ServiceStatus {
                status: "unhealthy",
                error: Some("database unreachable"),
            }
        }
    };

    let healthy = database.error.is_none();
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    (status_code, Json(response))
}
