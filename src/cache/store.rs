//! Entry Store Module
//!
//! Unsynchronized key/entry map. `InMemoryCache` wraps it in a lock; every
//! method here assumes the caller already holds the right guard.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Entry Store ==
/// Key/value storage with per-entry expiry.
#[derive(Debug)]
pub struct EntryStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V> Default for EntryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EntryStore<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Get ==
    /// Returns the entry for `key` if present and not expired at `now`.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str, now: Instant) -> Option<&CacheEntry<V>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
    }

    /// Mutable variant of [`EntryStore::get`].
    pub fn get_mut(&mut self, key: &str, now: Instant) -> Option<&mut CacheEntry<V>> {
        self.entries
            .get_mut(key)
            .filter(|entry| !entry.is_expired_at(now))
    }

    // == Insert ==
    /// Inserts a new entry unless a live one already exists for `key`.
    ///
    /// An expired entry that has not been swept yet is replaced.
    pub fn insert(&mut self, key: &str, value: V, duration: Duration, now: Instant) -> Result<()> {
        if self.get(key, now).is_some() {
            return Err(CacheError::EntryExists(key.to_string()));
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, duration, now));
        Ok(())
    }

    // == Remove ==
    /// Removes an entry by key. Returns true if something was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry by swapping in a fresh map.
    pub fn clear(&mut self) {
        self.entries = HashMap::new();
    }

    // == Cleanup Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
