//! In-Memory Cache Module
//!
//! The cache engine: an [`EntryStore`] behind a single reader/writer lock,
//! fixed or sliding expiration, and a background sweeper per instance.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::cache::{Cache, CacheEntry, EntryStore, Provider};
use crate::config::{CacheConfig, Config, EvictionMode};
use crate::error::Result;
use crate::tasks::{spawn_sweeper, Sweeper};

// == In-Memory Cache ==
/// A named in-process cache.
///
/// Every operation takes the instance lock exactly once, so lookups,
/// expiry checks and mutations for a key never interleave with another
/// writer or the sweeper. Reads in `Slide` mode take the write lock since
/// they rewrite the expiry.
///
/// Dropping the cache stops its sweeper.
#[derive(Debug)]
pub struct InMemoryCache<V> {
    name: String,
    eviction_mode: EvictionMode,
    sweep_interval: Duration,
    entries: Arc<RwLock<EntryStore<V>>>,
    sweeper: Option<Sweeper>,
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache from `config`, starting the sweeper unless the mode is
    /// `NoTtl`.
    ///
    /// Starting a sweeper requires a tokio runtime; without one this fails
    /// with `SweeperUnavailable`.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        let entries = Arc::new(RwLock::new(EntryStore::new()));
        let sweeper = if config.eviction_mode.needs_sweeper() {
            Some(spawn_sweeper(
                &config.name,
                entries.clone(),
                config.sweep_interval,
            )?)
        } else {
            None
        };

        info!(
            cache = %config.name,
            mode = %config.eviction_mode,
            "In-memory cache created"
        );

        Ok(Self {
            name: config.name.clone(),
            eviction_mode: config.eviction_mode,
            sweep_interval: config.sweep_interval,
            entries,
            sweeper,
        })
    }

    pub fn eviction_mode(&self) -> EvictionMode {
        self.eviction_mode
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true while the background sweeper is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|s| !s.is_finished())
    }

    // == Read Path ==
    /// Applies `f` to the live entry for `key`, sliding its expiry first when
    /// the cache is in `Slide` mode.
    fn with_live<R>(&self, key: &str, f: impl FnOnce(&CacheEntry<V>) -> R) -> Option<R> {
        let now = Instant::now();

        if self.eviction_mode == EvictionMode::Slide {
            let mut guard = self.entries.write();
            let entry = guard.get_mut(key, now)?;
            entry.slide(now);
            Some(f(&*entry))
        } else {
            let guard = self.entries.read();
            guard.get(key, now).map(f)
        }
    }
}

impl<V> Cache<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<V> {
        self.with_live(key, |entry| entry.value.clone())
    }

    fn get_or_put(&self, key: &str, value: V, duration: Duration) -> Result<V> {
        let now = Instant::now();
        let mut guard = self.entries.write();

        if let Some(entry) = guard.get_mut(key, now) {
            if self.eviction_mode == EvictionMode::Slide {
                entry.slide(now);
            }
            return Ok(entry.value.clone());
        }

        // Lookup and insert share one guard, so this cannot hit EntryExists
        guard.insert(key, value.clone(), duration, now)?;
        Ok(value)
    }

    fn put(&self, key: &str, value: V, duration: Duration) -> Result<()> {
        let now = Instant::now();
        let mut guard = self.entries.write();

        // The existence check is a read, so it slides a live entry too
        if self.eviction_mode == EvictionMode::Slide {
            if let Some(entry) = guard.get_mut(key, now) {
                entry.slide(now);
            }
        }
        let result = guard.insert(key, value, duration, now);
        drop(guard);

        if let Err(err) = &result {
            debug!(cache = %self.name, %err, "Put rejected");
        }
        result
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.with_live(key, |_| ()).is_some()
    }

    fn flush(&self) -> Result<()> {
        self.entries.write().clear();
        debug!(cache = %self.name, "Cache flushed");
        Ok(())
    }
}

// == In-Memory Provider ==
/// Provider building [`InMemoryCache`] instances.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    name: Option<String>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name recorded by `init`, if it has run.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<V> Provider<V> for InMemoryProvider
where
    V: Clone + Send + Sync + 'static,
{
    fn init(&mut self, name: &str, _config: &Config) -> Result<()> {
        // Nothing to connect to; just remember the registration name
        self.name = Some(name.to_string());
        Ok(())
    }

    fn create(&self, config: &CacheConfig) -> Result<Arc<dyn Cache<V>>> {
        Ok(Arc::new(InMemoryCache::new(config)?))
    }
}
