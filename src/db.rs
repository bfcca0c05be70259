//! Database Module
//!
//! SQLite connection pool creation, embedded migrations and health check.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

/// Seconds to wait for a pooled connection before giving up
const ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Opens a connection pool on `url`, creating the database file if needed.
pub async fn create_pool(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect_with(options)
        .await?;

    info!(url, max_connections, "Database connection pool created");
    Ok(pool)
}

/// Opens a pool on a private in-memory database.
///
/// An in-memory SQLite database lives as long as its connection, so the pool
/// holds exactly one connection that never expires.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    info!("Database migrations applied");
    Ok(())
}

/// Checks that the database answers a trivial query.
pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
