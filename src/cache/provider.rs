//! Backend Contract
//!
//! The capability interface every cache backend implements, consumed by
//! [`CacheManager`](crate::manager::CacheManager).

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheConfig, Config};
use crate::error::Result;

// == Cache ==
/// Operations of one named cache instance.
///
/// A `duration` of zero stores an entry that never expires.
pub trait Cache<V>: Send + Sync {
    /// Returns the name the cache was created with.
    fn name(&self) -> &str;

    /// Returns the value for `key` if present and not expired.
    fn get(&self, key: &str) -> Option<V>;

    /// Returns the live value for `key`, or stores `value` and returns it.
    fn get_or_put(&self, key: &str, value: V, duration: Duration) -> Result<V>;

    /// Stores `value` under `key`. Fails with `EntryExists` if `key` is live.
    fn put(&self, key: &str, value: V, duration: Duration) -> Result<()>;

    /// Removes `key` if present.
    fn delete(&self, key: &str) -> Result<()>;

    /// Returns true if `key` is present and not expired.
    fn exists(&self, key: &str) -> bool;

    /// Removes every entry.
    fn flush(&self) -> Result<()>;
}

// == Provider ==
/// Factory for caches of one backend.
pub trait Provider<V>: Send + Sync {
    /// One-time setup, called with the name the provider is registered under.
    fn init(&mut self, name: &str, config: &Config) -> Result<()>;

    /// Creates a new cache instance.
    fn create(&self, config: &CacheConfig) -> Result<Arc<dyn Cache<V>>>;
}
