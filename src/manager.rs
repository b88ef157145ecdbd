//! Cache Manager Module
//!
//! Registry of named providers and the cache instances built from them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::cache::{Cache, Provider};
use crate::config::{CacheConfig, Config};
use crate::error::{CacheError, Result};

// == Cache Manager ==
/// Looks up cache instances by name and creates them through registered
/// providers.
pub struct CacheManager<V> {
    providers: RwLock<HashMap<String, Box<dyn Provider<V>>>>,
    caches: RwLock<HashMap<String, Arc<dyn Cache<V>>>>,
}

impl<V: 'static> Default for CacheManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> CacheManager<V> {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            caches: RwLock::new(HashMap::new()),
        }
    }

    // == Providers ==
    /// Registers `provider` under `name`, replacing any earlier registration.
    pub fn add_provider(&self, name: impl Into<String>, provider: impl Provider<V> + 'static) {
        let name = name.into();
        if self
            .providers
            .write()
            .insert(name.clone(), Box::new(provider))
            .is_some()
        {
            warn!(provider = %name, "Cache provider replaced");
        }
    }

    /// Runs `init` on every registered provider; stops at the first failure.
    pub fn init_providers(&self, config: &Config) -> Result<()> {
        let mut providers = self.providers.write();
        for (name, provider) in providers.iter_mut() {
            provider.init(name, config)?;
            info!(provider = %name, "Cache provider initialized");
        }
        Ok(())
    }

    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.read().keys().cloned().collect();
        names.sort();
        names
    }

    // == Caches ==
    /// Creates a cache from `config` through its provider and registers it.
    pub fn create_cache(&self, config: &CacheConfig) -> Result<()> {
        config.validate()?;

        let mut caches = self.caches.write();
        if caches.contains_key(&config.name) {
            return Err(CacheError::CacheAlreadyExists(config.name.clone()));
        }

        let cache = {
            let providers = self.providers.read();
            let provider = providers
                .get(&config.provider_name)
                .ok_or_else(|| CacheError::ProviderNotFound(config.provider_name.clone()))?;
            provider.create(config)?
        };

        caches.insert(config.name.clone(), cache);
        info!(
            cache = %config.name,
            provider = %config.provider_name,
            "Cache registered"
        );
        Ok(())
    }

    /// Returns the cache registered under `name`.
    pub fn cache(&self, name: &str) -> Option<Arc<dyn Cache<V>>> {
        self.caches.read().get(name).cloned()
    }

    /// Returns the registered cache names, sorted.
    pub fn cache_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Unregisters a cache. Its sweeper stops once the last outstanding
    /// handle is dropped.
    pub fn remove_cache(&self, name: &str) -> bool {
        let removed = self.caches.write().remove(name).is_some();
        if removed {
            info!(cache = %name, "Cache removed");
        }
        removed
    }
}
