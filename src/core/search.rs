//! Regex matching over the package name list
//!
//! Patterns are anchored to the whole name, matching the behavior users
//! expect from `pypi-search "^aio.*"` style queries.

use regex::{Regex, RegexBuilder};

use crate::error::PypiSearchError;

/// Compile an anchored, optionally case-insensitive pattern
pub fn compile_pattern(pattern: &str, ignore_case: bool) -> Result<Regex, PypiSearchError> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(ignore_case)
        .build()
        .map_err(PypiSearchError::Pattern)
}

/// Filter the name list down to matching packages
#[must_use]
pub fn filter_matches<'a>(regex: &Regex, packages: &'a [String]) -> Vec<&'a str> {
    packages
        .iter()
        .map(String::as_str)
        .filter(|name| regex.is_match(name))
        .collect()
}
