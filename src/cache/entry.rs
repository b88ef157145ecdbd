//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the value, the TTL it was stored with, and the
/// instant after which it is expired.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// TTL requested on insert, zero = no expiration
    pub duration: Duration,
    /// Expiration instant, None iff `duration` is zero
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `duration` after `now`.
    ///
    /// A zero duration creates an entry that never expires.
    pub fn new(value: V, duration: Duration, now: Instant) -> Self {
        Self {
            value,
            duration,
            expires_at: expiry_from(now, duration),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: the entry is only expired once `now` is strictly
    /// past `expires_at`; at exactly `expires_at` it is still live.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    /// Checks if the entry has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Slide ==
    /// Pushes the expiry to `now + duration`. No-op for entries that never
    /// expire.
    pub fn slide(&mut self, now: Instant) {
        if self.expires_at.is_some() {
            self.expires_at = expiry_from(now, self.duration);
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

fn expiry_from(now: Instant, duration: Duration) -> Option<Instant> {
    if duration.is_zero() {
        None
    } else {
        // An overflowing deadline is as good as never
        now.checked_add(duration)
    }
}
