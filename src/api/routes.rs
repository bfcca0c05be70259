//! API Routes
//!
//! Configures the Axum router with all farm API endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_animal_handler, delete_animal_handler, favicon_handler, get_animal_handler,
    health_handler, list_animals_handler, root_handler, update_animal_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Welcome message and version
/// - `GET /health` - Health check endpoint
/// - `GET /favicon.icon` - Empty 204
/// - `GET /animals` - List animals, filtered by `status` and `race`
/// - `POST /animals` - Create an animal
/// - `GET /animals/:id` - Get one animal
/// - `PUT /animals/:id` - Partially update an animal
/// - `DELETE /animals/:id` - Delete an animal
///
/// The collection routes also answer with a trailing slash.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = get(list_animals_handler).post(create_animal_handler);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/favicon.icon", get(favicon_handler))
        .route("/animals", collection.clone())
        .route("/animals/", collection)
        .route(
            "/animals/:id",
            get(get_animal_handler)
                .put(update_animal_handler)
                .delete(delete_animal_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
