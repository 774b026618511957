//! Name-list cache with legacy migration shim
//!
//! The full set of registry package names is persisted as one snapshot.
//! Loading runs an explicit ordered fallback chain: the embedded store
//! first, then the legacy newline-delimited flat file. Saving always
//! writes the embedded store and retires the legacy file, so migration
//! completes after one successful save cycle without ever blocking a read.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::config::CacheConfig;
use crate::core::codec;
use crate::core::store::DetailStore;
use crate::error::StoreError;

/// Persisted whole-index snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameListSnapshot {
    /// Snapshot creation time, seconds since the Unix epoch
    pub generated_at: f64,
    /// Sorted, deduplicated package names
    pub packages: Vec<String>,
}

impl NameListSnapshot {
    /// Build a snapshot stamped with the current time
    #[must_use]
    pub fn new(packages: impl IntoIterator<Item = String>) -> Self {
        let unique: BTreeSet<String> = packages.into_iter().collect();
        Self {
            generated_at: codec::unix_now(),
            packages: unique.into_iter().collect(),
        }
    }

    /// Whether the snapshot is younger than `max_age_seconds`
    #[must_use]
    pub fn is_fresh(&self, max_age_seconds: f64) -> bool {
        codec::unix_now() - self.generated_at < max_age_seconds
    }
}

/// Outcome of one load strategy in the fallback chain
enum LoadOutcome {
    /// Snapshot found
    Hit(NameListSnapshot),
    /// Nothing persisted at this tier
    Miss,
    /// Tier present but unreadable; logged and skipped
    Failed(String),
}

/// Where a loaded snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Embedded store
    Store,
    /// Legacy flat file
    LegacyFile,
}

/// Name-list cache over the embedded store, read-compatible with the
/// legacy flat file until one save retires it
pub struct NameListCache<'a> {
    store: Option<&'a DetailStore>,
    legacy_path: PathBuf,
}

impl<'a> NameListCache<'a> {
    /// Create a cache over the given store (absent when the store failed
    /// to open) and the configured legacy file location
    #[must_use]
    pub fn new(store: Option<&'a DetailStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            legacy_path: config.legacy_cache_path(),
        }
    }

    /// Load the snapshot, trying each tier in order
    ///
    /// Returns the snapshot and the tier it came from, or `None` when no
    /// tier has one. Unreadable tiers are logged and skipped, never fatal.
    #[must_use]
    pub fn load(&self) -> Option<(NameListSnapshot, LoadSource)> {
        let strategies: [(LoadSource, fn(&Self) -> LoadOutcome); 2] = [
            (LoadSource::Store, Self::load_from_store),
            (LoadSource::LegacyFile, Self::load_from_legacy_file),
        ];

        for (source, strategy) in strategies {
            match strategy(self) {
                LoadOutcome::Hit(snapshot) => {
                    tracing::debug!(
                        "Loaded {} package names from {:?}",
                        snapshot.packages.len(),
                        source
                    );
                    return Some((snapshot, source));
                }
                LoadOutcome::Miss => {}
                LoadOutcome::Failed(reason) => {
                    tracing::warn!("Name-list load from {:?} failed: {}", source, reason);
                }
            }
        }
        None
    }

    /// Persist a new snapshot and retire the legacy file
    ///
    /// The write goes to the embedded store; if the legacy flat file still
    /// exists afterwards it is deleted. With the store unavailable the save
    /// is skipped (the invocation runs cache-bypassed).
    pub fn save(&self, snapshot: &NameListSnapshot) -> Result<(), StoreError> {
        let Some(store) = self.store else {
            tracing::warn!("Store unavailable, name-list snapshot not persisted");
            return Ok(());
        };

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| crate::error::CodecError::Header(e.to_string()))?;
        store.put_name_list(&bytes)?;

        if self.legacy_path.exists() {
            match std::fs::remove_file(&self.legacy_path) {
                Ok(()) => {
                    tracing::debug!(
                        "Migrated legacy name cache, removed {}",
                        self.legacy_path.display()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not remove legacy name cache {}: {}",
                        self.legacy_path.display(),
                        e
                    );
                }
            }
        }
        Ok(())
    }

    fn load_from_store(&self) -> LoadOutcome {
        let Some(store) = self.store else {
            return LoadOutcome::Miss;
        };
        match store.get_name_list() {
            Ok(Some(bytes)) => match bincode::deserialize::<NameListSnapshot>(&bytes) {
                Ok(snapshot) => LoadOutcome::Hit(snapshot),
                Err(e) => LoadOutcome::Failed(format!("snapshot decode: {e}")),
            },
            Ok(None) => LoadOutcome::Miss,
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }

    /// Read the legacy newline-delimited flat file
    ///
    /// `generated_at` is derived from the file's modification time, the
    /// only staleness signal the legacy format carries.
    fn load_from_legacy_file(&self) -> LoadOutcome {
        if !self.legacy_path.exists() {
            return LoadOutcome::Miss;
        }

        let mtime = match std::fs::metadata(&self.legacy_path).and_then(|m| m.modified()) {
            Ok(time) => time
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0),
            Err(e) => return LoadOutcome::Failed(format!("mtime: {e}")),
        };

        match std::fs::read_to_string(&self.legacy_path) {
            Ok(contents) => {
                let packages: Vec<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                LoadOutcome::Hit(NameListSnapshot {
                    generated_at: mtime,
                    packages,
                })
            }
            Err(e) => LoadOutcome::Failed(format!("read: {e}")),
        }
    }
}

/// Write a legacy-format flat file (sorted, trailing newline)
///
/// Only used by tests to fabricate pre-migration state; the tool itself
/// never writes this format anymore.
pub fn write_legacy_file(path: &std::path::Path, packages: &[String]) -> std::io::Result<()> {
    let mut sorted: Vec<&String> = packages.iter().collect();
    sorted.sort();
    sorted.dedup();
    let mut contents = String::new();
    for package in sorted {
        contents.push_str(package);
        contents.push('\n');
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
