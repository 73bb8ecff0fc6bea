//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers, one module per resource
//! - Optional bearer-token middleware
//! - Extractors that turn bad input into 400s
//! - Route definitions

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
