//! API Handlers
//!
//! HTTP request handlers over the registered caches.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, InMemoryProvider};
use crate::config::{Config, INMEMORY_PROVIDER};
use crate::error::{CacheError, Result};
use crate::manager::CacheManager;
use crate::models::{
    validate_key, CacheListResponse, DeleteResponse, ExistsResponse, FlushResponse, GetResponse,
    HealthResponse, PutRequest, PutResponse,
};

/// Application state shared across all handlers.
///
/// The manager owns every cache; dropping the last clone of the state stops
/// their sweepers.
#[derive(Clone)]
pub struct AppState {
    /// Registry of named caches holding JSON values
    pub manager: Arc<CacheManager<Value>>,
    /// TTL applied when a write omits `ttl_ms`
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around an existing manager.
    pub fn new(manager: CacheManager<Value>, default_ttl: Duration) -> Self {
        Self {
            manager: Arc::new(manager),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Registers the in-memory provider and creates every configured cache.
    /// Must run inside a tokio runtime when any cache uses a TTL mode.
    pub fn from_config(config: &Config) -> Result<Self> {
        let manager = CacheManager::new();
        manager.add_provider(INMEMORY_PROVIDER, InMemoryProvider::new());
        manager.init_providers(config)?;

        for cache_config in config.cache_configs() {
            manager.create_cache(&cache_config)?;
        }

        Ok(Self::new(manager, Duration::from_secs(config.default_ttl)))
    }

    fn cache(&self, name: &str) -> Result<Arc<dyn Cache<Value>>> {
        self.manager
            .cache(name)
            .ok_or_else(|| CacheError::CacheNotFound(name.to_string()))
    }
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for GET /caches/:name/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let key = checked_key(key)?;
    let value = state
        .cache(&name)?
        .get(&key)
        .ok_or_else(|| CacheError::KeyNotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for PUT /caches/:name/:key
///
/// Insert-only: responds 409 when a live entry already exists.
pub async fn put_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    let key = checked_key(key)?;
    let ttl = req.ttl(state.default_ttl);
    state.cache(&name)?.put(&key, req.value, ttl)?;

    Ok(Json(PutResponse::new(key)))
}

/// Handler for POST /caches/:name/:key
///
/// Returns the live value, storing the request value first if there is none.
pub async fn get_or_put_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
    Json(req): Json<PutRequest>,
) -> Result<Json<GetResponse>> {
    let key = checked_key(key)?;
    let ttl = req.ttl(state.default_ttl);
    let value = state.cache(&name)?.get_or_put(&key, req.value, ttl)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /caches/:name/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<ExistsResponse>> {
    let key = checked_key(key)?;
    let exists = state.cache(&name)?.exists(&key);

    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for DELETE /caches/:name/:key
///
/// Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let key = checked_key(key)?;
    state.cache(&name)?.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /caches/:name
pub async fn flush_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FlushResponse>> {
    state.cache(&name)?.flush()?;

    Ok(Json(FlushResponse::new(name)))
}

/// Handler for GET /caches
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    Json(CacheListResponse {
        caches: state.manager.cache_names(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
