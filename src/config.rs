//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use tracing::warn;

/// Which implementation of the animal store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite table accessed through a connection pool
    Sqlite,
    /// Process-local list, used for lightweight testing
    Memory,
}

impl StoreBackend {
    /// Parses a backend name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sql" => Some(Self::Sqlite),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Maximum number of pooled database connections
    pub max_connections: u32,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// Replace the store contents with the seed animals at startup
    pub seed_on_startup: bool,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - SQLite URL (default: sqlite://farm.db)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `STORE_BACKEND` - `sqlite` or `memory` (default: sqlite)
    /// - `SEED_ON_STARTUP` - Load the seed animals (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                warn!("Unknown STORE_BACKEND '{}', using sqlite", value);
                StoreBackend::Sqlite
            }),
            Err(_) => defaults.store_backend,
        };

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            store_backend,
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.seed_on_startup),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://farm.db".to_string(),
            max_connections: 5,
            store_backend: StoreBackend::Sqlite,
            seed_on_startup: true,
            server_port: 8000,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
