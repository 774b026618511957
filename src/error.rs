//! Error types for pypi-search
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Record encode/decode errors
///
/// Decode failures are deliberately not represented here: a record that
/// cannot be decoded is treated as a cache miss, not an error.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Header serialization failed
    #[error("Failed to serialize cache headers: {0}")]
    Header(String),

    /// Compression stream failed
    #[error("Failed to compress payload: {0}")]
    Compress(String),
}

/// Embedded store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying LMDB error (open, transaction, put, commit)
    #[error("Store error: {0}")]
    Lmdb(#[from] heed::Error),

    /// Failed to create the store directory
    #[error("Failed to create store directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Record encoding failed before the write
    #[error("Record encoding error: {0}")]
    Encode(#[from] CodecError),
}

/// Network fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection, timeout)
    #[error("Network error fetching '{url}': {error}")]
    Network { url: String, error: String },

    /// Non-2xx, non-404 HTTP status
    #[error("HTTP {status} fetching '{url}'")]
    Http { url: String, status: u16 },

    /// Response body is not valid JSON
    #[error("Invalid JSON in response for '{package}'")]
    InvalidJson { package: String },
}

/// Top-level pypi-search error type
#[derive(Error, Debug)]
pub enum PypiSearchError {
    /// Invalid search pattern
    #[error("Invalid regular expression: {0}")]
    Pattern(#[from] regex::Error),

    /// Store error
    #[error("Cache store error: {0}")]
    Store(#[from] StoreError),

    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Package index unavailable and no cached copy exists
    #[error("Package index unavailable: {0}")]
    IndexUnavailable(String),

    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}
