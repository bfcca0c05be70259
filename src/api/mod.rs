//! API Module
//!
//! HTTP handlers and routing for the farm REST API.
//!
//! # Endpoints
//! - `GET /` - Welcome message
//! - `GET /health` - Health check endpoint
//! - `GET /favicon.icon` - Empty response
//! - `GET|POST /animals` - List or create animals
//! - `GET|PUT|DELETE /animals/:id` - Read, update or delete one animal

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
