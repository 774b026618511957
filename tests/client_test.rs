//! Integration tests for the PyPI client
//!
//! Uses a mock HTTP server to cover:
//! - index anchor extraction
//! - validator header capture on detail fetches
//! - 404 vs transient-failure split, and 404 never reaching the store

mod common;

use common::TestCache;
use pypi_search::core::manager::CacheManager;
use pypi_search::error::FetchError;
use pypi_search::registry::client::PypiClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PypiClient {
    PypiClient::with_urls(
        format!("{}/simple/", server.uri()),
        format!("{}/pypi/{{package}}/json", server.uri()),
    )
}

#[tokio::test]
async fn test_fetch_index_extracts_anchor_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
               <a href="/simple/aiohttp/">aiohttp</a>
               <a href="/simple/flask/">flask/</a>
               </body></html>"#,
        ))
        .mount(&server)
        .await;

    let names = test_client(&server).fetch_index().await.unwrap();
    assert_eq!(names, vec!["aiohttp", "flask"]);
}

#[tokio::test]
async fn test_fetch_index_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_index().await;
    assert!(matches!(result, Err(FetchError::Http { status: 503, .. })));
}

#[tokio::test]
async fn test_fetch_detail_captures_validator_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/flask/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"v123\"")
                .insert_header("Last-Modified", "Tue, 02 Jan 2024 00:00:00 GMT")
                .set_body_string(r#"{"info":{"version":"3.0.0"}}"#),
        )
        .mount(&server)
        .await;

    let response = test_client(&server)
        .fetch_detail("flask")
        .await
        .unwrap()
        .expect("detail present");

    assert_eq!(response.headers.etag.as_deref(), Some("\"v123\""));
    assert_eq!(
        response.headers.last_modified.as_deref(),
        Some("Tue, 02 Jan 2024 00:00:00 GMT")
    );
    assert!(response.headers.timestamp > 0.0);
    assert_eq!(response.doc["info"]["version"], "3.0.0");
}

#[tokio::test]
async fn test_fetch_detail_404_is_none_and_never_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/no-such-package/json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = TestCache::new();
    let manager = CacheManager::open(cache.config());

    let response = test_client(&server)
        .fetch_detail("no-such-package")
        .await
        .unwrap();
    assert!(response.is_none());

    // The caller gets None and writes nothing; the store stays empty
    assert_eq!(manager.store().unwrap().detail_count().unwrap(), 0);
}

#[tokio::test]
async fn test_fetch_detail_server_error_is_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/flask/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_detail("flask").await;
    assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));
}

#[tokio::test]
async fn test_fetch_detail_invalid_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/flask/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_detail("flask").await;
    assert!(matches!(result, Err(FetchError::InvalidJson { .. })));
}

#[tokio::test]
async fn test_successful_fetch_round_trips_through_cache() {
    let server = MockServer::start().await;
    let body = r#"{"info":{"version":"3.0.0","description":"Web framework."}}"#;
    Mock::given(method("GET"))
        .and(path("/pypi/flask/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let cache = TestCache::new();
    let manager = CacheManager::open(cache.config());
    let client = test_client(&server);

    let response = client.fetch_detail("flask").await.unwrap().unwrap();
    manager
        .store_after_fetch("flask", &response.headers, &response.json, None)
        .unwrap();

    match manager.lookup("flask", false).unwrap() {
        pypi_search::core::manager::Lookup::Hit(record) => {
            assert_eq!(record.json, body);
            assert_eq!(record.headers, response.headers);
        }
        other => panic!("expected hit, got {other:?}"),
    }
}
