//! API Handlers
//!
//! HTTP request handlers for the service endpoints and the animal resource.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::db;
use crate::error::{FarmError, Result};
use crate::models::{
    Animal, CreateAnimalRequest, HealthResponse, ListAnimalsQuery, RootResponse,
    UpdateAnimalRequest,
};
use crate::store::{seed_animals, AnimalStore, MemoryAnimalStore, SqlAnimalStore};

/// Application state shared across all handlers.
///
/// Holds the animal store as a trait object so either backend can serve requests.
#[derive(Clone)]
pub struct AppState {
    /// Animal persistence
    pub store: Arc<dyn AnimalStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: impl AnimalStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens and migrates the database for the SQLite backend, then loads the
    /// seed animals when `seed_on_startup` is set.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let state = match config.store_backend {
            StoreBackend::Sqlite => {
                let pool = db::create_pool(&config.database_url, config.max_connections).await?;
                db::run_migrations(&pool).await?;
                Self::new(SqlAnimalStore::new(pool))
            }
            StoreBackend::Memory => Self::new(MemoryAnimalStore::new()),
        };

        if config.seed_on_startup {
            let seeded = state.store.replace_all(seed_animals()).await?;
            info!("Seeded {} animals", seeded);
        }

        Ok(state)
    }
}

// Extractors are taken as `Result` so their rejections go through `FarmError`
// and render as a JSON 400.
type Extracted<T, R> = std::result::Result<T, R>;

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::welcome())
}

/// Handler for GET /health
///
/// Reports 503 when the store cannot be reached.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy()),
            )
        }
    }
}

/// Handler for GET /favicon.icon
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Handler for GET /animals
///
/// Optional `status` (0/1) and `race` (value, name or label) filters.
pub async fn list_animals_handler(
    State(state): State<AppState>,
    query: Extracted<Query<ListAnimalsQuery>, QueryRejection>,
) -> Result<Json<Vec<Animal>>> {
    let Query(query) = query?;
    info!(
        "GET /animals - filters: status={:?}, race={:?}",
        query.status, query.race
    );
    let filter = query.into_filter()?;

    let animals = state.store.list(&filter).await?;
    info!("Returning {} animals", animals.len());

    Ok(Json(animals))
}

/// Handler for GET /animals/:id
pub async fn get_animal_handler(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<Json<Animal>> {
    let Path(id) = path?;
    let animal = state.store.get(id).await.map_err(|e| {
        if matches!(e, FarmError::NotFound(_)) {
            warn!("Animal {} not found", id);
        }
        e
    })?;

    info!("Animal {} found: {}", id, animal.name);
    Ok(Json(animal))
}

/// Handler for POST /animals
///
/// Returns 201 with the stored animal, including its id and creation time.
pub async fn create_animal_handler(
    State(state): State<AppState>,
    payload: Extracted<Json<CreateAnimalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Animal>)> {
    let Json(req) = payload?;
    let new_animal = req.into_new_animal(Utc::now().naive_utc())?;

    let animal = state.store.create(new_animal).await?;
    info!(
        "Created animal {} ({}, {})",
        animal.id,
        animal.name,
        animal.status.label()
    );

    Ok((StatusCode::CREATED, Json(animal)))
}

/// Handler for PUT /animals/:id
///
/// Only the fields present in the body are changed.
pub async fn update_animal_handler(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
    payload: Extracted<Json<UpdateAnimalRequest>, JsonRejection>,
) -> Result<Json<Animal>> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let changes = req.into_changes()?;

    let animal = state.store.update(id, changes).await?;
    info!("Updated animal {}", id);

    Ok(Json(animal))
}

/// Handler for DELETE /animals/:id
pub async fn delete_animal_handler(
    State(state): State<AppState>,
    path: Extracted<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = path?;
    state.store.delete(id).await?;
    info!("Deleted animal {}", id);

    Ok(StatusCode::NO_CONTENT)
}
