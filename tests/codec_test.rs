//! Integration tests for the binary record codec
//!
//! Property coverage:
//! - encode/decode round-trips for arbitrary headers and payloads
//! - corruption asymmetry: JSON failure invalidates, markdown degrades

use proptest::prelude::*;

use pypi_search::core::codec::{self, CacheHeaders};

fn headers_strategy() -> impl Strategy<Value = CacheHeaders> {
    (
        proptest::option::of("[ -~]{1,40}"),
        proptest::option::of("[ -~]{1,40}"),
        0.0f64..2_000_000_000.0,
    )
        .prop_map(|(etag, last_modified, timestamp)| CacheHeaders {
            etag,
            last_modified,
            timestamp,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_round_trip(
        headers in headers_strategy(),
        json in "\\{[ -~]{0,200}\\}",
        md in proptest::option::of("[ -~\\n]{0,400}"),
    ) {
        let bytes = codec::encode(&headers, &json, md.as_deref()).unwrap();
        let record = codec::decode(&bytes).expect("decode");
        prop_assert_eq!(record.headers, headers);
        prop_assert_eq!(record.json, json);
        prop_assert_eq!(record.md, md);
    }

    #[test]
    fn prop_truncation_never_panics(
        headers in headers_strategy(),
        cut in 0usize..32,
    ) {
        let bytes = codec::encode(&headers, "{\"a\":1}", Some("doc")).unwrap();
        let keep = bytes.len().saturating_sub(cut);
        // Any truncation either decodes degraded or returns None; no panic
        let _ = codec::decode(&bytes[..keep]);
    }
}

#[test]
fn test_empty_markdown_segment_is_absent_not_empty() {
    let headers = CacheHeaders::new(None, None);
    let bytes = codec::encode(&headers, "{}", None).unwrap();
    let record = codec::decode(&bytes).unwrap();
    assert_eq!(record.md, None);

    // An explicitly empty markdown string is preserved as present
    let bytes = codec::encode(&headers, "{}", Some("")).unwrap();
    let record = codec::decode(&bytes).unwrap();
    assert_eq!(record.md.as_deref(), Some(""));
}
