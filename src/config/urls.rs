//! PyPI endpoint URLs

/// Simple index listing every package name as an anchor tag
pub const PYPI_SIMPLE_INDEX: &str = "https://pypi.org/simple/";

/// Per-package JSON metadata endpoint; `{package}` is substituted
pub const PYPI_JSON_DETAIL: &str = "https://pypi.org/pypi/{package}/json";
