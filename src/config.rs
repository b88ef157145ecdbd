//! Configuration Module
//!
//! Per-cache configuration (`CacheConfig`, `EvictionMode`) and the
//! server configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Provider name of the in-memory backend.
pub const INMEMORY_PROVIDER: &str = "inmemory";

/// Sweep interval used when none is configured.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Longest accepted sweep interval (one day).
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// == Eviction Mode ==
/// How entries of a cache instance expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionMode {
    /// Entries never expire and no sweeper runs
    NoTtl,
    /// Entries expire at a fixed instant computed on insert
    #[default]
    Fixed,
    /// Every successful read pushes the expiry forward by the entry's duration
    Slide,
}

impl EvictionMode {
    /// Returns true if this mode needs a background sweeper.
    pub fn needs_sweeper(self) -> bool {
        self != EvictionMode::NoTtl
    }
}

impl FromStr for EvictionMode {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notl" | "no_ttl" | "nottl" | "none" => Ok(EvictionMode::NoTtl),
            "fixed" | "ttl" => Ok(EvictionMode::Fixed),
            "slide" | "sliding" => Ok(EvictionMode::Slide),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for EvictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvictionMode::NoTtl => "no_ttl",
            EvictionMode::Fixed => "fixed",
            EvictionMode::Slide => "slide",
        };
        f.write_str(s)
    }
}

// == Cache Config ==
/// Configuration of a single named cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Name the cache is registered under
    pub name: String,
    /// Name of the provider that builds the cache
    pub provider_name: String,
    /// Expiration behaviour of the cache
    pub eviction_mode: EvictionMode,
    /// Period between sweeps; ignored for `EvictionMode::NoTtl`
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates an in-memory cache config with fixed expiration and the
    /// default sweep interval.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_name: INMEMORY_PROVIDER.to_string(),
            eviction_mode: EvictionMode::default(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    pub fn with_provider(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = provider_name.into();
        self
    }

    pub fn with_eviction_mode(mut self, mode: EvictionMode) -> Self {
        self.eviction_mode = mode;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    // == Validate ==
    /// Checks the config before a cache is created from it.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CacheError::InvalidConfig(
                "cache name cannot be empty".to_string(),
            ));
        }
        if self.provider_name.trim().is_empty() {
            return Err(CacheError::InvalidConfig(format!(
                "provider name cannot be empty for cache '{}'",
                self.name
            )));
        }
        if self.eviction_mode.needs_sweeper() && self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(format!(
                "sweep interval must be positive for cache '{}' in {} mode",
                self.name, self.eviction_mode
            )));
        }
        if self.eviction_mode.needs_sweeper() && self.sweep_interval > MAX_SWEEP_INTERVAL {
            return Err(CacheError::InvalidConfig(format!(
                "sweep interval for cache '{}' exceeds {}s",
                self.name,
                MAX_SWEEP_INTERVAL.as_secs()
            )));
        }
        Ok(())
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Names of the caches created at startup
    pub cache_names: Vec<String>,
    /// Eviction mode applied to every startup cache
    pub eviction_mode: EvictionMode,
    /// Sweep interval in seconds
    pub sweep_interval: u64,
    /// TTL in seconds for HTTP writes that omit one
    pub default_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_NAMES` - Comma separated cache names (default: "default")
    /// - `EVICTION_MODE` - `no_ttl`, `fixed` or `slide` (default: fixed)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cache_names: env::var("CACHE_NAMES")
                .ok()
                .map(|v| parse_names(&v))
                .filter(|names| !names.is_empty())
                .unwrap_or(defaults.cache_names),
            eviction_mode: env::var("EVICTION_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.eviction_mode),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
        }
    }

    /// Expands the configured cache names into in-memory cache configs.
    pub fn cache_configs(&self) -> Vec<CacheConfig> {
        self.cache_names
            .iter()
            .map(|name| {
                CacheConfig::new(name.clone())
                    .with_eviction_mode(self.eviction_mode)
                    .with_sweep_interval(Duration::from_secs(self.sweep_interval))
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_names: vec!["default".to_string()],
            eviction_mode: EvictionMode::Fixed,
            sweep_interval: DEFAULT_SWEEP_INTERVAL.as_secs(),
            default_ttl: 300,
        }
    }
}

fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_names, vec!["default".to_string()]);
        assert_eq!(config.eviction_mode, EvictionMode::Fixed);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.default_ttl, 300);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_NAMES");
        env::remove_var("EVICTION_MODE");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("DEFAULT_TTL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_names, vec!["default".to_string()]);
        assert_eq!(config.eviction_mode, EvictionMode::Fixed);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.default_ttl, 300);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_names(" sessions, lookups ,,results"),
            vec!["sessions", "lookups", "results"]
        );
        assert!(parse_names(" , ").is_empty());
    }

    #[test]
    fn test_cache_configs() {
        let config = Config {
            cache_names: vec!["a".to_string(), "b".to_string()],
            eviction_mode: EvictionMode::Slide,
            sweep_interval: 5,
            ..Config::default()
        };

        let configs = config.cache_configs();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].name, "b");
        assert_eq!(configs[1].provider_name, INMEMORY_PROVIDER);
        assert_eq!(configs[1].eviction_mode, EvictionMode::Slide);
        assert_eq!(configs[1].sweep_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_eviction_mode_from_str() {
        assert_eq!("NoTTL".parse::<EvictionMode>().unwrap(), EvictionMode::NoTtl);
        assert_eq!("fixed".parse::<EvictionMode>().unwrap(), EvictionMode::Fixed);
        assert_eq!(" Slide ".parse::<EvictionMode>().unwrap(), EvictionMode::Slide);
        assert!(matches!(
            "lru".parse::<EvictionMode>(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_eviction_mode_serde() {
        let json = serde_json::to_string(&EvictionMode::NoTtl).unwrap();
        assert_eq!(json, r#""no_ttl""#);
        let mode: EvictionMode = serde_json::from_str(r#""slide""#).unwrap();
        assert_eq!(mode, EvictionMode::Slide);
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        assert!(CacheConfig::new("").validate().is_err());
        assert!(CacheConfig::new("c").with_provider(" ").validate().is_err());
    }

    #[test]
    fn test_validate_sweep_interval() {
        let zero = CacheConfig::new("c").with_sweep_interval(Duration::ZERO);
        assert!(matches!(zero.validate(), Err(CacheError::InvalidConfig(_))));

        // NoTtl never sweeps, so the interval is irrelevant
        let no_ttl = zero.with_eviction_mode(EvictionMode::NoTtl);
        assert!(no_ttl.validate().is_ok());

        let huge = CacheConfig::new("c").with_sweep_interval(Duration::from_secs(u64::MAX));
        assert!(matches!(huge.validate(), Err(CacheError::InvalidConfig(_))));

        let max = CacheConfig::new("c").with_sweep_interval(MAX_SWEEP_INTERVAL);
        assert!(max.validate().is_ok());
    }
}
