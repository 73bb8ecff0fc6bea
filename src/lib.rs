//! Order API - CRUD backend for an order-management system
//!
//! Users authenticate; categories, products, clients and orders are
//! managed over HTTP/JSON and persisted in PostgreSQL through SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities and request payloads
//! - **services**: Authentication
//! - **infra**: Database, migrations, repositories, storage facade
//! - **api**: HTTP handlers, extractors, middleware and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies pending migrations first)
//! cargo run -- serve --port 8080
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use errors::{AppError, AppResult};
