//! API Module
//!
//! HTTP handlers and routing exposing the registered caches.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /caches` - List cache names
//! - `GET|PUT|POST|DELETE /caches/:name/:key` - Key operations
//! - `GET /caches/:name/:key/exists` - Liveness check for a key
//! - `DELETE /caches/:name` - Flush a cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
