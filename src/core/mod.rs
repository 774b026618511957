//! Caching core
//!
//! The two-tier cache: a whole-index name-list snapshot and a per-package
//! detail store with a binary record codec, plus the manager that
//! orchestrates fetch-or-serve decisions.

pub mod codec;
pub mod manager;
pub mod names;
pub mod render;
pub mod search;
pub mod store;
