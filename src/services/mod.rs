//! Application services layer.
//!
//! CRUD handlers talk to repositories directly through the storage
//! facade; only authentication has logic of its own worth a service.

mod auth_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
