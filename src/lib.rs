//! In-memory cache - an in-process key/value cache with TTL expiration
//!
//! Named cache instances with fixed or sliding expiration, a background
//! sweeper per instance, a provider registry, and an HTTP front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, InMemoryCache, InMemoryProvider, Provider};
pub use config::{CacheConfig, Config, EvictionMode};
pub use error::{CacheError, Result};
pub use manager::CacheManager;
