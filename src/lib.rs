//! Farm API - A small REST service for a farm's animals
//!
//! CRUD over animal records stored in SQLite, with an in-memory store for
//! lightweight testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::FarmError;
