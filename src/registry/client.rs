//! Registry client implementation
//!
//! Fetches the PyPI simple index (HTML anchor tags enumerating package
//! names) and per-package JSON metadata. Every call is a single request
//! with a fixed timeout; failed fetches are reported once, never retried.

use std::time::Duration;

use regex::Regex;
use serde_json::Value;

use crate::config::{defaults, urls};
use crate::core::codec::CacheHeaders;
use crate::error::FetchError;

/// Fresh metadata for one package, ready for the cache write-back
#[derive(Debug, Clone)]
pub struct DetailResponse {
    /// Fetch provenance (validators + timestamp)
    pub headers: CacheHeaders,
    /// Raw JSON body
    pub json: String,
    /// Parsed document, shared with rendering
    pub doc: Value,
}

/// Client for the PyPI index and metadata endpoints
#[derive(Debug)]
pub struct PypiClient {
    client: reqwest::Client,
    simple_url: String,
    detail_url: String,
}

impl PypiClient {
    /// Create a client against the public PyPI endpoints
    #[must_use]
    pub fn new() -> Self {
        Self::with_urls(
            urls::PYPI_SIMPLE_INDEX.to_string(),
            urls::PYPI_JSON_DETAIL.to_string(),
        )
    }

    /// Create a client with custom endpoints (used by tests)
    #[must_use]
    pub fn with_urls(simple_url: String, detail_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            simple_url,
            detail_url,
        }
    }

    /// Download the full package index and extract every name
    ///
    /// The simple index is an HTML document whose anchor link texts are
    /// the package names; trailing slashes are stripped.
    pub async fn fetch_index(&self) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(&self.simple_url)
            .timeout(Duration::from_secs(defaults::INDEX_FETCH_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: self.simple_url.clone(),
                error: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: self.simple_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Network {
            url: self.simple_url.clone(),
            error: e.to_string(),
        })?;

        Ok(extract_anchor_names(&body))
    }

    /// Fetch one package's JSON metadata
    ///
    /// Returns `Ok(None)` for 404 ("does not exist" is terminal and never
    /// cached); every other non-2xx or transport failure is an error.
    pub async fn fetch_detail(&self, package: &str) -> Result<Option<DetailResponse>, FetchError> {
        let url = self.detail_url.replace("{package}", package);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(defaults::DETAIL_FETCH_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.clone(),
                error: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let etag = header_string(&response, reqwest::header::ETAG);
        let last_modified = header_string(&response, reqwest::header::LAST_MODIFIED);

        let json = response.text().await.map_err(|e| FetchError::Network {
            url: url.clone(),
            error: e.to_string(),
        })?;

        let doc: Value =
            serde_json::from_str(&json).map_err(|_| FetchError::InvalidJson {
                package: package.to_string(),
            })?;

        Ok(Some(DetailResponse {
            headers: CacheHeaders::new(etag, last_modified),
            json,
            doc,
        }))
    }
}

impl Default for PypiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn header_string(response: &reqwest::Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Pull anchor-tag link texts out of the simple-index HTML
fn extract_anchor_names(html: &str) -> Vec<String> {
    // The simple index is machine-generated, one anchor per package; a
    // regex over link texts is enough, no DOM needed.
    let anchor = Regex::new(r"<a[^>]*>([^<]+)</a>").expect("static regex");
    anchor
        .captures_iter(html)
        .filter_map(|cap| {
            let name = cap[1].trim().trim_end_matches('/');
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_anchor_names() {
        let html = r#"
            <html><body>
            <a href="/simple/aiohttp/">aiohttp</a>
            <a href="/simple/flask/">flask/</a>
            <a href="/simple/django/"> django </a>
            <a href="/x"></a>
            </body></html>
        "#;
        let names = extract_anchor_names(html);
        assert_eq!(names, vec!["aiohttp", "flask", "django"]);
    }

    #[test]
    fn test_extract_anchor_names_empty_document() {
        assert!(extract_anchor_names("<html></html>").is_empty());
    }
}
