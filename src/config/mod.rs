//! Configuration and constants
//!
//! All cache tuning lives in one [`CacheConfig`] struct constructed once at
//! startup and passed by reference into the store and manager. There is no
//! ambient global configuration.

pub mod defaults;
pub mod urls;

use std::path::PathBuf;
use std::time::Duration;

use crate::infra::dirs::PypiSearchDirs;

/// Cache configuration, built once at startup
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Base cache directory (holds the store and the legacy flat file)
    pub cache_dir: PathBuf,
    /// Maximum age of the name-list snapshot before a refetch
    pub name_list_max_age: Duration,
    /// Maximum age of a detail record before a refetch
    pub detail_max_age: Duration,
    /// Age beyond which the prune sweep deletes a detail record
    pub prune_max_age: Duration,
    /// LMDB map size in bytes
    pub map_size: usize,
}

impl CacheConfig {
    /// Build the configuration from platform directories and defaults
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache_dir(PypiSearchDirs::new().cache_dir())
    }

    /// Build the configuration with an explicit cache directory
    ///
    /// Used by tests to point the cache at a temporary directory.
    #[must_use]
    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            name_list_max_age: Duration::from_secs(defaults::NAME_LIST_MAX_AGE_SECONDS),
            detail_max_age: Duration::from_secs(defaults::DETAIL_MAX_AGE_SECONDS),
            prune_max_age: Duration::from_secs(defaults::PRUNE_MAX_AGE_SECONDS),
            map_size: defaults::STORE_MAP_SIZE,
        }
    }

    /// Path of the embedded store directory
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.cache_dir.join(defaults::STORE_SUBDIR)
    }

    /// Path of the legacy flat-file name cache
    #[must_use]
    pub fn legacy_cache_path(&self) -> PathBuf {
        self.cache_dir.join(defaults::LEGACY_CACHE_FILE)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_is_under_cache_dir() {
        let config = CacheConfig::with_cache_dir(PathBuf::from("/tmp/pypi-test"));
        assert!(config.store_path().starts_with(&config.cache_dir));
        assert!(config.legacy_cache_path().starts_with(&config.cache_dir));
    }

    #[test]
    fn test_windows_are_ordered() {
        let config = CacheConfig::with_cache_dir(PathBuf::from("/tmp/pypi-test"));
        assert!(config.name_list_max_age < config.detail_max_age);
        assert!(config.detail_max_age < config.prune_max_age);
    }
}
