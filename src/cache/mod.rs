//! Cache Module
//!
//! Provides the in-memory cache engine with fixed and sliding TTL expiration,
//! and the backend traits it implements.

mod entry;
mod memory;
mod provider;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use memory::{InMemoryCache, InMemoryProvider};
pub use provider::{Cache, Provider};
pub use store::EntryStore;
