//! pypi-search - Search PyPI package names by regex
//!
//! This library provides the core functionality for searching the PyPI
//! name index by regular expression, with a two-tier local cache: a
//! whole-index name-list snapshot and a per-package binary detail store.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Caching core (codec, store, manager, name list)
//! - [`registry`] - PyPI index and metadata client
//! - [`infra`] - Infrastructure layer (directories)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
pub mod registry;
