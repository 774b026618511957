//! Embedded detail store
//!
//! Wraps an LMDB environment with two named databases: `details`, keyed by
//! raw package-name bytes, holding codec-encoded records; and `names`,
//! holding the single whole-index name-list snapshot.
//!
//! All access is through scoped transactions committed before the method
//! returns. Commit failures propagate to the caller: store corruption is
//! fatal, not retried.

use std::path::Path;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::config::CacheConfig;
use crate::core::codec;
use crate::error::StoreError;

/// Key for the name-list snapshot in the `names` database
const NAME_LIST_KEY: &str = "all-packages";

/// Embedded key-value store for per-package records
pub struct DetailStore {
    env: Env,
    details: Database<Bytes, Bytes>,
    names: Database<Str, Bytes>,
}

impl DetailStore {
    /// Open or create the store under the configured cache directory
    pub fn open(config: &CacheConfig) -> Result<Self, StoreError> {
        let path = config.store_path();
        std::fs::create_dir_all(&path).map_err(|e| StoreError::CreateDir {
            path: path.clone(),
            error: e.to_string(),
        })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(config.map_size)
                .max_dbs(2)
                .open(&path)?
        };

        let mut wtxn = env.write_txn()?;
        let details = env.create_database(&mut wtxn, Some("details"))?;
        let names = env.create_database(&mut wtxn, Some("names"))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            details,
            names,
        })
    }

    /// Open the store at an explicit path (test helper)
    pub fn open_at(path: &Path, map_size: usize) -> Result<Self, StoreError> {
        let mut config = CacheConfig::with_cache_dir(path.to_path_buf());
        config.map_size = map_size;
        Self::open(&config)
    }

    /// Write one detail record, overwriting any previous entry
    pub fn put_detail(&self, package: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn()?;
        self.details.put(&mut wtxn, package.as_bytes(), value)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Read one detail record; a missing key is `Ok(None)`
    pub fn get_detail(&self, package: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn()?;
        Ok(self
            .details
            .get(&rtxn, package.as_bytes())?
            .map(<[u8]>::to_vec))
    }

    /// Write the name-list snapshot bytes
    pub fn put_name_list(&self, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn()?;
        self.names.put(&mut wtxn, NAME_LIST_KEY, value)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Read the name-list snapshot bytes
    pub fn get_name_list(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn()?;
        Ok(self.names.get(&rtxn, NAME_LIST_KEY)?.map(<[u8]>::to_vec))
    }

    /// Delete detail records older than `max_age_seconds`
    ///
    /// A header-only sweep: each record's header segment is parsed without
    /// decompressing the payloads. Entries whose header segment fails to
    /// parse are deleted regardless of age. Returns the deletion count.
    pub fn prune_stale(&self, max_age_seconds: f64) -> Result<usize, StoreError> {
        let now = codec::unix_now();
        let mut wtxn = self.env.write_txn()?;

        let mut doomed: Vec<Vec<u8>> = Vec::new();
        {
            let iter = self.details.iter(&wtxn)?;
            for entry in iter {
                let (key, value) = entry?;
                match codec::decode_headers(value) {
                    Some(headers) if now - headers.timestamp <= max_age_seconds => {}
                    Some(_) => doomed.push(key.to_vec()),
                    None => {
                        tracing::warn!(
                            "Pruning entry with unparseable header segment: {}",
                            String::from_utf8_lossy(key)
                        );
                        doomed.push(key.to_vec());
                    }
                }
            }
        }

        for key in &doomed {
            self.details.delete(&mut wtxn, key)?;
        }
        wtxn.commit()?;

        Ok(doomed.len())
    }

    /// Number of detail records currently stored
    pub fn detail_count(&self) -> Result<usize, StoreError> {
        let rtxn = self.env.read_txn()?;
        Ok(self.details.len(&rtxn)? as usize)
    }
}
