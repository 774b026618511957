//! Binary record codec
//!
//! Encodes a per-package cache entry as three length-prefixed segments:
//! bincode-serialized headers, zlib-compressed JSON text, and
//! zlib-compressed rendered markdown (an empty segment when absent). Each
//! segment is prefixed by a 4-byte big-endian length.
//!
//! Decoding is asymmetric on purpose: a failure in the header or JSON
//! segment invalidates the whole record, while a failure in the markdown
//! segment alone degrades it to `md = None`. JSON is the source of truth;
//! markdown is cheap to regenerate from it.

use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Provenance of one fetch: HTTP validators plus the fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheHeaders {
    /// `ETag` response header, if the source sent one
    pub etag: Option<String>,
    /// `Last-Modified` response header, if the source sent one
    pub last_modified: Option<String>,
    /// Fetch time, seconds since the Unix epoch
    pub timestamp: f64,
}

impl CacheHeaders {
    /// Create headers stamped with the current time
    #[must_use]
    pub fn new(etag: Option<String>, last_modified: Option<String>) -> Self {
        Self {
            etag,
            last_modified,
            timestamp: unix_now(),
        }
    }

    /// Age of this fetch in seconds (zero if the clock went backwards)
    #[must_use]
    pub fn age_seconds(&self) -> f64 {
        (unix_now() - self.timestamp).max(0.0)
    }
}

/// One decoded entry of the detail store
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    /// Fetch provenance
    pub headers: CacheHeaders,
    /// Raw metadata document from the JSON endpoint
    pub json: String,
    /// Pre-rendered description, absent if never requested
    pub md: Option<String>,
}

/// Current time, seconds since the Unix epoch
#[must_use]
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Encode a record to its binary form
pub fn encode(
    headers: &CacheHeaders,
    json: &str,
    md: Option<&str>,
) -> Result<Vec<u8>, CodecError> {
    let header_bytes =
        bincode::serialize(headers).map_err(|e| CodecError::Header(e.to_string()))?;
    let json_bytes = compress(json.as_bytes())?;
    let md_bytes = match md {
        Some(text) => compress(text.as_bytes())?,
        None => Vec::new(),
    };

    let mut out =
        Vec::with_capacity(12 + header_bytes.len() + json_bytes.len() + md_bytes.len());
    for segment in [&header_bytes, &json_bytes, &md_bytes] {
        let len = u32::try_from(segment.len())
            .map_err(|_| CodecError::Compress("segment exceeds 4 GiB".to_string()))?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(segment);
    }
    Ok(out)
}

/// Decode a record from its binary form
///
/// Returns `None` if the record is structurally corrupt: a length prefix
/// that overruns the buffer, an unparseable header segment, or a JSON
/// segment that fails to decompress. A markdown segment that fails to
/// decompress degrades to `md = None` instead.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<DetailRecord> {
    let mut pos = 0usize;
    let header_seg = read_segment(bytes, &mut pos)?;
    let json_seg = read_segment(bytes, &mut pos)?;
    let md_seg = read_segment(bytes, &mut pos)?;

    let headers: CacheHeaders = bincode::deserialize(header_seg).ok()?;
    let json = decompress_utf8(json_seg)?;
    let md = if md_seg.is_empty() {
        None
    } else {
        decompress_utf8(md_seg)
    };

    Some(DetailRecord { headers, json, md })
}

/// Decode only the header segment of a record
///
/// Used by the prune sweep to read timestamps without decompressing the
/// payloads.
#[must_use]
pub fn decode_headers(bytes: &[u8]) -> Option<CacheHeaders> {
    let mut pos = 0usize;
    let header_seg = read_segment(bytes, &mut pos)?;
    bincode::deserialize(header_seg).ok()
}

/// Read one 4-byte big-endian length prefix and the segment it declares
fn read_segment<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let len_end = pos.checked_add(4)?;
    let len_bytes: [u8; 4] = bytes.get(*pos..len_end)?.try_into().ok()?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    let seg_end = len_end.checked_add(len)?;
    let segment = bytes.get(len_end..seg_end)?;
    *pos = seg_end;
    Some(segment)
}

fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .map_err(|e| CodecError::Compress(e.to_string()))
}

fn decompress_utf8(data: &[u8]) -> Option<String> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = String::new();
    decoder.read_to_string(&mut out).ok()?;
    Some(out)
}
