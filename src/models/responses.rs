//! Response DTOs for the farm API
//!
//! Defines the structure of outgoing HTTP response bodies other than
//! `Animal`, which is serialized as-is.

use serde::Serialize;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "farm-api";

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    /// Greeting
    pub message: String,
    /// Crate version
    pub version: String,
}

impl RootResponse {
    /// Creates the welcome message for the running version
    pub fn welcome() -> Self {
        Self {
            message: "Welcome".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Name of the service
    pub service: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a HealthResponse reporting an unreachable store
    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            ..Self::healthy()
        }
    }
}
