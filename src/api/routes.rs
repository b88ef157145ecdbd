//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, exists_handler, flush_handler, get_handler, get_or_put_handler,
    health_handler, list_caches_handler, put_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /caches` - List registered caches
/// - `DELETE /caches/:name` - Flush a cache
/// - `GET /caches/:name/:key` - Retrieve a value
/// - `PUT /caches/:name/:key` - Store a value (insert-only)
/// - `POST /caches/:name/:key` - Retrieve, storing the body value if absent
/// - `DELETE /caches/:name/:key` - Delete a key
/// - `GET /caches/:name/:key/exists` - Check whether a key is live
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/caches", get(list_caches_handler))
        .route("/caches/:name", delete(flush_handler))
        .route(
            "/caches/:name/:key",
            get(get_handler)
                .put(put_handler)
                .post(get_or_put_handler)
                .delete(delete_handler),
        )
        .route("/caches/:name/:key/exists", get(exists_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
