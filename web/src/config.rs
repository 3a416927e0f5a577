//! Configuration management for the store service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A value that is present but cannot be parsed falls back to its default.

use composable_todo_postgres::DatabaseConfig;
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Document store connection
    pub database: DatabaseConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// `host:port` string to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Which origins may call the service from a browser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsConfig {
    /// Any origin (`*`)
    #[default]
    AnyOrigin,
    /// Only these exact origins
    AllowList(Vec<String>),
}

impl CorsConfig {
    /// Parse `CORS_ALLOWED_ORIGINS`: `*` or a comma-separated origin list.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToString::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::AnyOrigin
        } else {
            Self::AllowList(origins)
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerConfig::default();
        let database_defaults = DatabaseConfig::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(server_defaults.host),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(server_defaults.port),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .map_or(server_defaults.shutdown_timeout, Duration::from_secs),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or(database_defaults.url),
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(database_defaults.max_connections),
                connect_timeout: lookup("DATABASE_CONNECT_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .map_or(database_defaults.connect_timeout, Duration::from_secs),
            },
            cors: lookup("CORS_ALLOWED_ORIGINS")
                .map(|value| CorsConfig::parse(&value))
                .unwrap_or_default(),
        }
    }
}
