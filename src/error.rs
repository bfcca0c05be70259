//! Error types for the farm API
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Farm Error Enum ==
/// Unified error type for the farm API.
#[derive(Error, Debug)]
pub enum FarmError {
    /// No animal with the requested id
    #[error("{0}")]
    NotFound(String),

    /// Invalid input: unknown enum value, out-of-range field, duplicate name
    #[error("{0}")]
    Validation(String),

    /// Failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FarmError {
    /// Not-found error for an animal id
    pub fn animal_not_found(id: i64) -> Self {
        Self::NotFound(format!("Animal with id {} does not exist", id))
    }

    /// Validation error for a race that is not part of the closed set
    pub fn unknown_race(race: &str) -> Self {
        Self::Validation(format!("Race '{}' does not exist", race))
    }
}

// == Extractor Rejections ==
// Malformed bodies, query strings and path segments are bad input, so they
// render as 400 with the usual JSON body.
impl From<JsonRejection> for FarmError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for FarmError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for FarmError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for FarmError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            FarmError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            FarmError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            FarmError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            FarmError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the farm API.
pub type Result<T> = std::result::Result<T, FarmError>;
