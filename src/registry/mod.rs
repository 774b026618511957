//! PyPI registry client
//!
//! Fetches the simple name index and per-package JSON metadata.

pub mod client;
