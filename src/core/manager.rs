//! Cache manager
//!
//! Orchestrates fetch-or-serve for per-package metadata. A lookup consults
//! the detail store, decodes through the codec, and checks staleness; any
//! negative outcome is surfaced as a fetch-required signal for the network
//! collaborator, which calls back through [`CacheManager::store_after_fetch`].
//!
//! Store-open failure puts the manager in bypass mode: every lookup signals
//! fetch-required and nothing is written. A store-write failure after a
//! successful live fetch is the one condition that propagates: silently
//! losing that write would desynchronize headers from payload.

use crate::config::CacheConfig;
use crate::core::codec::{self, CacheHeaders, DetailRecord};
use crate::core::render;
use crate::core::store::DetailStore;
use crate::error::StoreError;

/// Why a lookup could not be served from cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// Store failed to open; cache bypassed this invocation
    StoreUnavailable,
    /// No entry for this package
    Miss,
    /// Entry present but structurally invalid
    Corrupt,
    /// Entry present but older than the freshness window
    Stale,
}

/// Result of a cache lookup
#[derive(Debug)]
pub enum Lookup {
    /// Fresh record served from cache
    Hit(DetailRecord),
    /// Caller must fetch from the network
    FetchRequired(FetchReason),
}

/// Fetch-or-serve orchestrator over the detail store
pub struct CacheManager {
    store: Option<DetailStore>,
    config: CacheConfig,
}

impl CacheManager {
    /// Open the store under the configured cache directory
    ///
    /// An open failure is never fatal: it is logged and the manager runs
    /// in bypass mode for this invocation.
    #[must_use]
    pub fn open(config: CacheConfig) -> Self {
        let store = match DetailStore::open(&config) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Detail store unavailable, bypassing cache: {}", e);
                None
            }
        };
        Self { store, config }
    }

    /// Build a manager around an already-open store (test helper)
    #[must_use]
    pub fn with_store(store: Option<DetailStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Access the underlying store, if it opened
    #[must_use]
    pub fn store(&self) -> Option<&DetailStore> {
        self.store.as_ref()
    }

    /// Look up a package, serving from cache when possible
    ///
    /// With `want_full_description`, a fresh record lacking markdown is a
    /// partial miss: the cached JSON is kept, the markdown is re-rendered
    /// from it, and the record is re-stored with its original headers.
    pub fn lookup(
        &self,
        package: &str,
        want_full_description: bool,
    ) -> Result<Lookup, StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(Lookup::FetchRequired(FetchReason::StoreUnavailable));
        };

        let Some(bytes) = store.get_detail(package)? else {
            tracing::debug!("Cache miss for '{}'", package);
            return Ok(Lookup::FetchRequired(FetchReason::Miss));
        };

        let Some(record) = codec::decode(&bytes) else {
            tracing::warn!("Corrupt cache record for '{}', refetching", package);
            return Ok(Lookup::FetchRequired(FetchReason::Corrupt));
        };

        // Staleness is a soft trigger: the old entry stays until the
        // refetch overwrites it, pruning is a separate sweep.
        if record.headers.age_seconds() > self.config.detail_max_age.as_secs_f64() {
            tracing::debug!("Stale cache record for '{}'", package);
            return Ok(Lookup::FetchRequired(FetchReason::Stale));
        }

        if want_full_description && record.md.is_none() {
            return self.upgrade_partial_miss(store, package, record);
        }

        Ok(Lookup::Hit(record))
    }

    /// Store fresh metadata after a live fetch
    ///
    /// `md` carries the rendered description only when a full description
    /// was requested this round; otherwise `None` is stored and a later
    /// full-description lookup takes the partial-miss path instead of a
    /// full refetch. Write failures are logged and propagated.
    pub fn store_after_fetch(
        &self,
        package: &str,
        headers: &CacheHeaders,
        json: &str,
        md: Option<&str>,
    ) -> Result<(), StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };

        let bytes = codec::encode(headers, json, md)?;
        store.put_detail(package, &bytes).map_err(|e| {
            tracing::warn!("Failed to store record for '{}': {}", package, e);
            e
        })
    }

    /// Delete records older than the prune window; returns the count
    pub fn prune(&self) -> Result<usize, StoreError> {
        match self.store.as_ref() {
            Some(store) => store.prune_stale(self.config.prune_max_age.as_secs_f64()),
            None => Ok(0),
        }
    }

    /// Re-render markdown from cached JSON and rewrite the record
    ///
    /// Headers are preserved: the JSON itself did not change, so its
    /// provenance must not either.
    fn upgrade_partial_miss(
        &self,
        store: &DetailStore,
        package: &str,
        record: DetailRecord,
    ) -> Result<Lookup, StoreError> {
        let Ok(doc) = serde_json::from_str::<serde_json::Value>(&record.json) else {
            tracing::warn!("Cached JSON for '{}' is unparseable, refetching", package);
            return Ok(Lookup::FetchRequired(FetchReason::Corrupt));
        };

        let md = render::render_description(&doc);
        let bytes = codec::encode(&record.headers, &record.json, Some(&md))?;
        store.put_detail(package, &bytes)?;

        tracing::debug!("Partial miss for '{}': markdown rendered from cache", package);
        Ok(Lookup::Hit(DetailRecord {
            md: Some(md),
            ..record
        }))
    }
}
