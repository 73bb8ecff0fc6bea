//! Integration tests for API endpoints.
//!
//! Every test builds the real router over a fresh in-memory SQLite
//! database with the crate's migrations applied, then drives it with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database as SeaDatabase};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use order_api::config::Config;
use order_api::infra::{Database, Migrator};
use order_api::{create_router, AppState};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// Harness
// =============================================================================

async fn test_app_with(require_auth: bool) -> Router {
    // One connection: every pooled connection to `sqlite::memory:` is its own database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let connection = SeaDatabase::connect(options).await.unwrap();
    Migrator::up(&connection, None).await.unwrap();

    let mut config = Config::with_secret(TEST_SECRET).unwrap();
    config.require_auth = require_auth;

    let database = Arc::new(Database::from_connection(connection));
    create_router(AppState::from_config(database, config))
}

async fn test_app() -> Router {
    test_app_with(false).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), None).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body), None).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None, None).await
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

async fn create_category(app: &Router, name: &str) -> String {
    let (status, body) = post(app, "/category", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    id_of(&body)
}

async fn create_client(app: &Router, first_name: &str, last_name: &str) -> String {
    let (status, body) = post(
        app,
        "/client",
        json!({ "first_name": first_name, "last_name": last_name, "phone_number": "555-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    id_of(&body)
}

async fn create_product(app: &Router, name: &str, category_id: &str) -> String {
    let (status, body) = post(
        app,
        "/product",
        json!({
            "name": name,
            "category_id": category_id,
            "description": "a thing",
            "price": 9.5,
            "quantity": 3
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    id_of(&body)
}

fn register_body(login: &str) -> Value {
    json!({
        "first_name": "Ann",
        "last_name": "Li",
        "login": login,
        "password": "correct horse",
        "phone_number": "555-1"
    })
}

// =============================================================================
// Root and Health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app().await;
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Order API is running".into()));
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_pool_closed() {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let connection = SeaDatabase::connect(options).await.unwrap();
    let handle = connection.clone();

    let config = Config::with_secret(TEST_SECRET).unwrap();
    let database = Arc::new(Database::from_connection(connection));
    let app = create_router(AppState::from_config(database, config));

    handle.close().await.unwrap();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["error"], "database unreachable");
}

// =============================================================================
// CRUD Semantics
// =============================================================================

#[tokio::test]
async fn test_client_round_trip() {
    let app = test_app().await;

    let (status, created) = post(
        &app,
        "/client",
        json!({ "first_name": "Ann", "last_name": "Li", "phone_number": "555-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["first_name"], "Ann");
    assert_eq!(created["last_name"], "Li");
    assert_eq!(created["phone_number"], "555-1");
    assert!(Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());

    let (status, fetched) = get(&app, &format!("/client/{}", id_of(&created))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_validation_errors_use_envelope() {
    let app = test_app().await;

    let (status, body) = post(&app, "/client", json!({ "first_name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "first_name is required");

    let (status, body) = post(&app, "/category", json!({ "title": "wrong field" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_unknown_and_known() {
    let app = test_app().await;

    let (status, body) = put(
        &app,
        &format!("/category/{}", Uuid::new_v4()),
        json!({ "name": "Ghost" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no rows affected");

    let id = create_category(&app, "Tools").await;
    let (status, body) = put(&app, &format!("/category/{}", id), json!({ "name": "Garden" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "Garden");
}

#[tokio::test]
async fn test_delete_unknown_then_known() {
    let app = test_app().await;

    let (status, _) = delete(&app, &format!("/client/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = create_client(&app, "Ann", "Li").await;
    let (status, _) = delete(&app, &format!("/client/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, &format!("/client/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "record not found");
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let app = test_app().await;
    let (status, body) = get(&app, "/product/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid id");
}

// =============================================================================
// Lists
// =============================================================================

#[tokio::test]
async fn test_list_paging_defaults() {
    let app = test_app().await;
    for i in 0..12 {
        create_category(&app, &format!("Category {}", i)).await;
    }

    let (status, body) = get(&app, "/category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 12);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);

    let (_, body) = get(&app, "/category?limit=0").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 10);

    let (_, body) = get(&app, "/category?offset=10&limit=5").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/category?offset=-4&limit=").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_offset_beyond_total_keeps_count() {
    let app = test_app().await;
    create_client(&app, "Ann", "Li").await;
    create_client(&app, "Bob", "Ray").await;

    let (status, body) = get(&app, "/client?offset=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_integer_paging_rejected() {
    let app = test_app().await;

    let (status, body) = get(&app, "/client?limit=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid limit");

    let (status, _) = get(&app, "/client?offset=1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_literal() {
    let app = test_app().await;
    create_client(&app, "Annabel", "Li").await;
    create_client(&app, "Bob", "Hannah").await;
    create_client(&app, "Carl", "Ray").await;

    let (_, body) = get(&app, "/client?search=ANN").await;
    assert_eq!(body["count"], 2);

    let (_, body) = get(&app, "/client?search=carl").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["first_name"], "Carl");

    // Wildcards in the term match literally
    let (_, body) = get(&app, "/client?search=%25").await;
    assert_eq!(body["count"], 0);

    // Injection attempts are just text
    let (status, body) = get(&app, "/client?search=x'%20OR%201=1%20--").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_hides_password() {
    let app = test_app().await;
    let (status, body) = post(&app, "/register", register_body("ann")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["login"], "ann");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_login_is_conflict() {
    let app = test_app().await;
    post(&app, "/register", register_body("ann")).await;

    let (status, body) = post(&app, "/register", register_body("ann")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "user already exists");
}

#[tokio::test]
async fn test_login_outcomes() {
    let app = test_app().await;
    post(&app, "/register", register_body("ann")).await;

    let (status, body) = post(
        &app,
        "/login",
        json!({ "login": "ann", "password": "correct horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["access_token"].as_str().unwrap().is_empty());

    let (status, _) = post(
        &app,
        "/login",
        json!({ "login": "ann", "password": "battery staple" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/login",
        json!({ "login": "nobody", "password": "correct horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_require_auth_guards_resources() {
    let app = test_app_with(true).await;

    let (status, _) = get(&app, "/client").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/client", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    post(&app, "/register", register_body("ann")).await;
    let (_, body) = post(
        &app,
        "/login",
        json!({ "login": "ann", "password": "correct horse" }),
    )
    .await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/client", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_crud_rehashes_password() {
    let app = test_app().await;

    let (status, created) = post(&app, "/user", register_body("ann")).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&created);

    let mut update = register_body("ann.li");
    update["password"] = json!("new password 1");
    let (status, updated) = put(&app, &format!("/user/{}", id), update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["login"], "ann.li");

    let (status, _) = post(
        &app,
        "/login",
        json!({ "login": "ann.li", "password": "new password 1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/user?search=ann.").await;
    assert_eq!(body["count"], 1);

    let (status, _) = delete(&app, &format!("/user/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// =============================================================================
// Joins and Order Items
// =============================================================================

#[tokio::test]
async fn test_product_embeds_category() {
    let app = test_app().await;
    let category_id = create_category(&app, "Tools").await;
    let product_id = create_product(&app, "Hammer", &category_id).await;

    let (status, body) = get(&app, &format!("/product/{}", product_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_id"], category_id.as_str());
    assert_eq!(body["category_data"]["name"], "Tools");
    assert_eq!(body["price"], 9.5);
    assert_eq!(body["quantity"], 3);

    let (_, body) = get(&app, "/product?search=hamm").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["category_data"]["id"], category_id.as_str());
}

#[tokio::test]
async fn test_foreign_keys_reject_dangling_references() {
    let app = test_app().await;

    let (status, _) = post(
        &app,
        "/product",
        json!({ "name": "Orphan", "category_id": Uuid::new_v4(), "price": 1.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let category_id = create_category(&app, "Tools").await;
    create_product(&app, "Hammer", &category_id).await;

    // Still referenced by a product
    let (status, _) = delete(&app, &format!("/category/{}", category_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_referenced_rows_survive_delete() {
    let app = test_app().await;
    let client_id = create_client(&app, "Ann", "Li").await;
    let category_id = create_category(&app, "Tools").await;
    let product_id = create_product(&app, "Hammer", &category_id).await;

    let (_, order) = post(
        &app,
        "/order",
        json!({ "client_id": client_id, "price": 9.5, "status": "new" }),
    )
    .await;
    let order_id = id_of(&order);
    let (status, _) = post(
        &app,
        "/order_item",
        json!({ "order_id": order_id, "product_id": product_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in [
        format!("/client/{}", client_id),
        format!("/product/{}", product_id),
        format!("/category/{}", category_id),
    ] {
        let (status, body) = delete(&app, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            body["error"],
            "referenced record does not exist or is still in use"
        );

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn test_order_with_items() {
    let app = test_app().await;
    let client_id = create_client(&app, "Ann", "Li").await;
    let category_id = create_category(&app, "Tools").await;
    let product_id = create_product(&app, "Hammer", &category_id).await;

    let (status, order) = post(
        &app,
        "/order",
        json!({ "client_id": client_id, "price": 19.0, "status": "new" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["client_data"]["first_name"], "Ann");
    assert!(order["order_products"].as_array().unwrap().is_empty());
    let order_id = id_of(&order);

    let (status, item) = post(
        &app,
        "/order_item",
        json!({ "order_id": order_id, "product_id": product_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = id_of(&item);

    let (status, order) = get(&app, &format!("/order/{}", order_id)).await;
    assert_eq!(status, StatusCode::OK);
    let items = order["order_products"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], item_id.as_str());
    assert_eq!(items[0]["product_data"]["name"], "Hammer");
    assert_eq!(items[0]["product_data"]["category_data"]["name"], "Tools");

    // Search covers the client's names
    let (_, body) = get(&app, "/order?search=li").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["order_products"].as_array().unwrap().len(), 1);

    // An order with line items cannot be deleted
    let (status, _) = delete(&app, &format!("/order/{}", order_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete(&app, &format!("/order_item/{}", item_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&app, &format!("/order_item/{}", item_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete(&app, &format!("/order/{}", order_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_order_item_with_unknown_order_rejected() {
    let app = test_app().await;
    let category_id = create_category(&app, "Tools").await;
    let product_id = create_product(&app, "Hammer", &category_id).await;

    let (status, _) = post(
        &app,
        "/order_item",
        json!({ "order_id": Uuid::new_v4(), "product_id": product_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
