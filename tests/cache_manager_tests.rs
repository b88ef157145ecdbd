//! Integration Tests for the cache manager and in-memory provider
//!
//! Exercises caches the way a host application does: register the provider,
//! create caches by config, then use them through `Arc<dyn Cache<V>>`.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use inmemory_cache::{
    Cache, CacheConfig, CacheError, CacheManager, Config, EvictionMode, InMemoryCache,
    InMemoryProvider,
};

// == Helper Functions ==

fn create_manager() -> CacheManager<usize> {
    let mgr = CacheManager::new();
    mgr.add_provider("inmemory", InMemoryProvider::new());
    mgr.init_providers(&Config::default()).unwrap();
    mgr
}

fn create_test_cache(name: &str, mode: EvictionMode) -> Arc<dyn Cache<usize>> {
    let mgr = create_manager();
    mgr.create_cache(
        &CacheConfig::new(name)
            .with_eviction_mode(mode)
            .with_sweep_interval(Duration::from_millis(200)),
    )
    .unwrap();
    mgr.cache(name).unwrap()
}

// == Tests ==

#[tokio::test]
async fn test_add_and_get() {
    let c = create_test_cache("addgetcache", EvictionMode::Fixed);
    for i in 0..20 {
        c.put(&format!("key_{}", i), i, Duration::from_secs(3)).unwrap();
    }

    for i in 5..10 {
        assert_eq!(c.get(&format!("key_{}", i)), Some(i));
    }
    assert_eq!(c.name(), "addgetcache");
}

#[tokio::test]
async fn test_add_and_delete() {
    let c = create_test_cache("adddeletecache", EvictionMode::Fixed);
    for i in 0..20 {
        c.put(&format!("key_{}", i), i, Duration::from_secs(3)).unwrap();
    }

    for i in 5..10 {
        let key = format!("key_{}", i);
        c.delete(&key).unwrap();
        assert_eq!(c.get(&key), None);
        assert!(!c.exists(&key));
    }
}

#[tokio::test]
async fn test_put_twice_fails() {
    let c = create_test_cache("insertonly", EvictionMode::Fixed);

    c.put("k", 1, Duration::from_secs(3)).unwrap();
    assert_eq!(
        c.put("k", 2, Duration::from_secs(3)),
        Err(CacheError::EntryExists("k".to_string()))
    );
    assert_eq!(c.get("k"), Some(1));
}

#[tokio::test]
async fn test_sweeper_reclaims_without_reads() {
    let config = CacheConfig::new("sweep").with_sweep_interval(Duration::from_millis(200));
    let c: InMemoryCache<usize> = InMemoryCache::new(&config).unwrap();

    c.put("k", 1, Duration::from_millis(50)).unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Never read, so only the sweeper could have removed it
    assert_eq!(c.len(), 0);
    assert!(!c.exists("k"));
}

#[tokio::test]
async fn test_flush_removes_everything() {
    let c = create_test_cache("flushcache", EvictionMode::Slide);
    for i in 0..50 {
        c.put(&format!("key_{}", i), i, Duration::ZERO).unwrap();
    }

    c.flush().unwrap();

    for i in 0..50 {
        assert_eq!(c.get(&format!("key_{}", i)), None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_access() {
    let c = create_test_cache("multiaccess", EvictionMode::Slide);
    for i in 0..20 {
        c.put(&format!("key_{}", i), i, Duration::from_secs(1)).unwrap();
    }

    let deadline = Instant::now() + Duration::from_secs(3);

    let slider = {
        let c = c.clone();
        thread::spawn(move || {
            for i in 21..30 {
                let key = format!("key_{}", i);
                assert_eq!(c.get_or_put(&key, i, Duration::from_secs(1)), Ok(i));
                assert!(c.exists(&key));
            }
            while Instant::now() < deadline {
                for i in 21..30 {
                    assert_eq!(c.get(&format!("key_{}", i)), Some(i));
                }
            }
        })
    };

    let deleter = {
        let c = c.clone();
        thread::spawn(move || {
            for i in 5..9 {
                let key = format!("key_{}", i);
                c.delete(&key).unwrap();
                assert_eq!(c.get(&key), None);
            }
        })
    };

    slider.join().unwrap();
    deleter.join().unwrap();

    // Never read after the first second, so the fixed set has expired
    for i in 0..20 {
        assert_eq!(c.get(&format!("key_{}", i)), None);
    }
    for i in 21..30 {
        assert_eq!(c.get(&format!("key_{}", i)), Some(i));
    }
}
