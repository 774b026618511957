//! Default configuration values

/// Maximum age of the name-list snapshot before a refetch (23 hours)
pub const NAME_LIST_MAX_AGE_SECONDS: u64 = 23 * 3600;

/// Maximum age of a per-package detail record before a refetch (7 days)
///
/// Per-package metadata changes less often than the full index, so this
/// window is deliberately longer than the name-list window.
pub const DETAIL_MAX_AGE_SECONDS: u64 = 7 * 24 * 3600;

/// Age beyond which a detail record is deleted by the prune sweep (30 days)
pub const PRUNE_MAX_AGE_SECONDS: u64 = 30 * 24 * 3600;

/// Fixed LMDB map size (10 GiB)
pub const STORE_MAP_SIZE: usize = 10 * 1024 * 1024 * 1024;

/// Timeout for downloading the full package index (seconds)
pub const INDEX_FETCH_TIMEOUT_SECONDS: u64 = 15;

/// Timeout for fetching a single package's metadata (seconds)
pub const DETAIL_FETCH_TIMEOUT_SECONDS: u64 = 10;

/// Default maximum number of detail fetches per search
pub const DEFAULT_DETAIL_LIMIT: usize = 10;

/// Legacy flat-file name cache (newline-delimited package names)
pub const LEGACY_CACHE_FILE: &str = "pypi_search.cache";

/// Embedded store directory name under the cache directory
pub const STORE_SUBDIR: &str = "index.db";
