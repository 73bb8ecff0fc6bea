//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Development-only signing key, used when `JWT_SECRET` is unset in debug builds
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Require a bearer token on every resource route
    pub require_auth: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("require_auth", &self.require_auth)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or is too short,
    /// or if REQUIRE_AUTH is set to something that is not a boolean.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let mut config = Self::with_secret(jwt_secret)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(max) = parse_var("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = max;
        }
        if let Some(hours) = parse_var("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_var("SERVER_PORT") {
            config.server_port = port;
        }
        if let Ok(value) = env::var("REQUIRE_AUTH") {
            config.require_auth = parse_flag(&value).ok_or_else(|| {
                AppError::internal(format!(
                    "REQUIRE_AUTH must be true/false, 1/0, yes/no or on/off, got {:?}",
                    value
                ))
            })?;
        }

        Ok(config)
    }

    /// Build a configuration with defaults and the given signing secret.
    ///
    /// Used by `from_env` and directly by tests.
    pub fn with_secret(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            require_auth: false,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Read and parse an environment variable, ignoring unset or malformed values
fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse a boolean switch, case-insensitively; `None` for anything unrecognized
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
