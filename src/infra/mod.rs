//! Infrastructure layer
//!
//! Platform-specific concerns that the caching core depends on.

pub mod dirs;
