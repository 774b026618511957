//! Platform-specific directory management
//!
//! Provides the per-user cache directory following platform conventions
//! (XDG on Linux, Library on macOS).
//!
//! The `PYPI_SEARCH_CACHE_DIR` environment variable overrides the default.

use std::env;
use std::path::PathBuf;

/// Environment variable name for the cache directory override
pub const ENV_CACHE_DIR: &str = "PYPI_SEARCH_CACHE_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "pypi_search";

/// Platform-specific directory provider for pypi-search
#[derive(Debug, Clone)]
pub struct PypiSearchDirs {
    cache_dir: PathBuf,
}

impl PypiSearchDirs {
    /// Create a new `PypiSearchDirs` instance
    ///
    /// Checks the environment variable first, then falls back to the
    /// platform default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_dir: Self::resolve_cache_dir(),
        }
    }

    /// Get the cache directory path
    ///
    /// - Linux: `$XDG_CACHE_HOME/pypi_search` or `~/.cache/pypi_search`
    /// - macOS: `~/Library/Caches/pypi_search`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    fn resolve_cache_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CACHE_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_cache_dir()
    }

    fn platform_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".cache").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".cache").join(APP_NAME))
            })
    }
}

impl Default for PypiSearchDirs {
    fn default() -> Self {
        Self::new()
    }
}
