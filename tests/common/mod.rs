//! Common test utilities and helpers
//!
//! This module provides shared fixtures for integration tests.

use std::path::PathBuf;

use pypi_search::config::CacheConfig;
use tempfile::TempDir;

/// Map size small enough for test environments
pub const TEST_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Test cache context
///
/// Creates a temporary cache directory and a configuration pointing at it.
pub struct TestCache {
    /// Temporary directory holding the store and legacy file
    pub dir: TempDir,
}

impl TestCache {
    /// Create a new test cache in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the cache directory path
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Build a configuration rooted at the temporary directory
    pub fn config(&self) -> CacheConfig {
        let mut config = CacheConfig::with_cache_dir(self.path());
        config.map_size = TEST_MAP_SIZE;
        config
    }
}
