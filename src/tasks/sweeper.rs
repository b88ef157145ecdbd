//! Expiry Sweeper
//!
//! Background task that periodically removes expired entries from one
//! cache instance.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::EntryStore;
use crate::error::{CacheError, Result};

/// Handle to a running sweeper task.
///
/// The task stops on [`Sweeper::stop`] or when the handle is dropped.
#[derive(Debug)]
pub struct Sweeper {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawns a task that sweeps expired entries out of `entries` every
/// `interval`.
///
/// The first sweep runs one full interval after spawning. Each sweep holds
/// the write lock only for the duration of the scan.
///
/// Fails with `SweeperUnavailable` when called outside a tokio runtime, and
/// with `InvalidConfig` when `interval` overflows the clock.
pub fn spawn_sweeper<V>(
    cache_name: &str,
    entries: Arc<RwLock<EntryStore<V>>>,
    interval: Duration,
) -> Result<Sweeper>
where
    V: Send + Sync + 'static,
{
    let runtime = Handle::try_current().map_err(|e| {
        CacheError::SweeperUnavailable(format!("cache '{}': {}", cache_name, e))
    })?;

    let first_tick = time::Instant::now()
        .checked_add(interval)
        .and_then(|start| start.checked_add(interval).map(|_| start))
        .ok_or_else(|| {
            CacheError::InvalidConfig(format!(
                "sweep interval {:?} out of range for cache '{}'",
                interval, cache_name
            ))
        })?;

    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let name = cache_name.to_string();

    let handle = runtime.spawn(async move {
        info!(cache = %name, ?interval, "Sweeper started");

        let mut ticker = time::interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Fires on explicit stop and on sender drop
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    let removed = entries.write().cleanup_expired(Instant::now());

                    if removed > 0 {
                        info!(cache = %name, removed, "Sweep removed expired entries");
                    } else {
                        debug!(cache = %name, "Sweep found no expired entries");
                    }
                }
            }
        }

        info!(cache = %name, "Sweeper stopped");
    });

    Ok(Sweeper {
        stop_tx: Some(stop_tx),
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store() -> Arc<RwLock<EntryStore<&'static str>>> {
        Arc::new(RwLock::new(EntryStore::new()))
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let store = shared_store();
        store
            .write()
            .insert("expire_soon", "value", Duration::from_millis(50), Instant::now())
            .unwrap();

        let sweeper = spawn_sweeper("test", store.clone(), Duration::from_millis(100)).unwrap();

        time::sleep(Duration::from_millis(250)).await;

        assert!(store.read().is_empty(), "Expired entry should have been swept");
        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_preserves_live_entries() {
        let store = shared_store();
        {
            let mut guard = store.write();
            let now = Instant::now();
            guard.insert("long_lived", "value", Duration::from_secs(3600), now).unwrap();
            guard.insert("forever", "value", Duration::ZERO, now).unwrap();
        }

        let sweeper = spawn_sweeper("test", store.clone(), Duration::from_millis(50)).unwrap();

        time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.read().len(), 2);
        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_drop() {
        let store = shared_store();
        let sweeper = spawn_sweeper("test", store.clone(), Duration::from_millis(50)).unwrap();
        let weak = Arc::downgrade(&store);
        drop(store);

        drop(sweeper);
        time::sleep(Duration::from_millis(100)).await;

        // The task owned the last strong reference
        assert!(weak.upgrade().is_none(), "Sweeper task should have exited");
    }

    #[tokio::test]
    async fn test_sweeper_stop_finishes_task() {
        let sweeper = spawn_sweeper("test", shared_store(), Duration::from_secs(60)).unwrap();
        assert!(!sweeper.is_finished());
        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_rejects_unbounded_interval() {
        let result = spawn_sweeper("test", shared_store(), Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_sweeper_requires_runtime() {
        let result = spawn_sweeper("test", shared_store(), Duration::from_secs(1));
        assert!(matches!(result, Err(CacheError::SweeperUnavailable(_))));
    }
}
