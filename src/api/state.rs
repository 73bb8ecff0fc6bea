//! Application state - Dependency injection container.
//!
//! Handlers reach storage, auth and the raw database handle through here.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Persistence, Storage};
use crate::services::{AuthService, Authenticator};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Repository access
    pub storage: Arc<dyn Storage>,
    /// Registration, login and token checks
    pub auth_service: Arc<dyn AuthService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the production services over an open database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(Persistence::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::new(storage.clone(), config.clone()));

        Self {
            storage,
            auth_service,
            database,
            config: Arc::new(config),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        storage: Arc<dyn Storage>,
        auth_service: Arc<dyn AuthService>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            storage,
            auth_service,
            database,
            config: Arc::new(config),
        }
    }
}
