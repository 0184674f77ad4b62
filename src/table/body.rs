//! Body document normalization
//!
//! The body is processed permissively: elements that cannot be used are
//! dropped, never fatal. Many producers emit a valid hash under one
//! fingerprint scheme and a garbage placeholder under the other, so
//! identity resolution is an order-fixed fallback chain (md5, then
//! sha256) with exact validity predicates, never a "whichever field is
//! non-empty" guess.

use crate::document::value_kind;
use crate::table::Level;
use crate::{Result, TableError};
use serde::Serialize;
use serde_json::{Map, Value};

/// A resolved content fingerprint for one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ChecksumIdentity {
    /// 32 hexadecimal characters
    Md5(String),

    /// 64 hexadecimal characters
    Sha256(String),
}

/// One normalized body item
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    /// The resolved fingerprint
    pub identity: ChecksumIdentity,

    /// The original `level` value, preserved as given
    pub level: Level,

    /// The full original record, including fields outside the required
    /// shape and the raw `md5`/`sha256`/`level` values
    pub fields: Map<String, Value>,
}

/// Result of normalizing a body document
#[derive(Debug, Clone)]
pub struct NormalizedBody {
    /// Surviving entries, in source order
    pub entries: Vec<TableEntry>,

    /// How many elements were dropped
    pub dropped: usize,
}

/// Filters and classifies a decoded body document
///
/// The value must be an array; anything else fails with
/// [`TableError::BodyShape`] naming the observed type. Elements are then
/// processed independently; an element is dropped (silently, with a debug
/// log) when it is not an object, its `level` is missing or neither a
/// number nor a string, or it has no usable identity. An empty result is
/// valid output, not an error.
pub fn normalize_body(value: Value) -> Result<NormalizedBody> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(TableError::BodyShape {
                actual: value_kind(&other),
            })
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut dropped = 0;

    for (index, item) in items.into_iter().enumerate() {
        match normalize_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                dropped += 1;
                tracing::debug!(index, reason, "dropped body element");
            }
        }
    }

    Ok(NormalizedBody { entries, dropped })
}

/// Normalizes a single body element, or names the reason it is unusable
fn normalize_entry(item: Value) -> std::result::Result<TableEntry, &'static str> {
    let fields = match item {
        Value::Object(map) => map,
        _ => return Err("not an object"),
    };

    let level = fields
        .get("level")
        .and_then(Level::from_value)
        .ok_or("level is missing or neither a number nor a string")?;

    let identity = resolve_identity(&fields).ok_or("no usable md5 or sha256 identity")?;

    Ok(TableEntry {
        identity,
        level,
        fields,
    })
}

/// Order-fixed identity resolution: md5 first, sha256 second
fn resolve_identity(fields: &Map<String, Value>) -> Option<ChecksumIdentity> {
    if let Some(digest) = checksum_of_len(fields.get("md5"), 32) {
        return Some(ChecksumIdentity::Md5(digest));
    }

    checksum_of_len(fields.get("sha256"), 64).map(ChecksumIdentity::Sha256)
}

/// Accepts a field only as a string of exactly `hex_len` hex characters
///
/// Sentinel values seen in the wild (`""`, `"null"`, JSON null, truncated
/// digests) all fail the length or charset predicate.
fn checksum_of_len(value: Option<&Value>, hex_len: usize) -> Option<String> {
    let text = value?.as_str()?;
    if text.len() != hex_len {
        return None;
    }
    if hex::decode(text).is_err() {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MD5: &str = "d0f497c0f955e7edfb0278f446cdb6f8";
    const SHA256: &str = "769359ebb55d3d6dff3b5c6a07ec03be9b87beda1ffb0c07d7ea99590605a732";

    #[test]
    fn test_valid_md5_entry() {
        let body = normalize_body(json!([{"level": "1", "md5": MD5}])).unwrap();

        assert_eq!(body.entries.len(), 1);
        assert_eq!(body.dropped, 0);
        assert_eq!(
            body.entries[0].identity,
            ChecksumIdentity::Md5(MD5.to_string())
        );
        assert_eq!(body.entries[0].level, Level::Text("1".to_string()));
    }

    #[test]
    fn test_md5_wins_over_sha256_when_both_valid() {
        let body = normalize_body(json!([{"level": 1, "md5": MD5, "sha256": SHA256}])).unwrap();
        assert_eq!(
            body.entries[0].identity,
            ChecksumIdentity::Md5(MD5.to_string())
        );
    }

    #[test]
    fn test_sentinel_md5_falls_through_to_sha256() {
        for sentinel in [json!(""), json!("null"), json!(null), json!("abc123")] {
            let body = normalize_body(json!([
                {"level": "1", "md5": sentinel, "sha256": SHA256}
            ]))
            .unwrap();

            assert_eq!(body.entries.len(), 1, "sentinel {sentinel:?}");
            assert_eq!(
                body.entries[0].identity,
                ChecksumIdentity::Sha256(SHA256.to_string())
            );
        }
    }

    #[test]
    fn test_non_hex_md5_is_rejected() {
        // Right length, wrong charset
        let body = normalize_body(json!([
            {"level": "1", "md5": "zzf497c0f955e7edfb0278f446cdb6f8"}
        ]))
        .unwrap();
        assert!(body.entries.is_empty());
        assert_eq!(body.dropped, 1);
    }

    #[test]
    fn test_unusable_elements_are_dropped_silently() {
        let body = normalize_body(json!([
            {"level": 1},
            "not-an-object",
            null,
            {"level": "2", "md5": "short"},
        ]))
        .unwrap();

        assert!(body.entries.is_empty());
        assert_eq!(body.dropped, 4);
    }

    #[test]
    fn test_bad_level_drops_entry() {
        let body = normalize_body(json!([
            {"level": {"nested": true}, "md5": MD5},
            {"md5": MD5},
            {"level": [1], "md5": MD5},
        ]))
        .unwrap();
        assert!(body.entries.is_empty());
        assert_eq!(body.dropped, 3);
    }

    #[test]
    fn test_every_original_field_is_preserved() {
        let body = normalize_body(json!([{
            "level": "12",
            "md5": MD5,
            "title": "Air",
            "artist": "someone",
            "url_diff": "http://example.com/diff",
            "proposer": null,
        }]))
        .unwrap();

        let fields = &body.entries[0].fields;
        assert_eq!(fields["title"], "Air");
        assert_eq!(fields["artist"], "someone");
        assert_eq!(fields["url_diff"], "http://example.com/diff");
        assert_eq!(fields["proposer"], Value::Null);
        assert_eq!(fields["md5"], MD5);
        assert_eq!(fields["level"], "12");
    }

    #[test]
    fn test_duplicates_are_kept_in_source_order() {
        let body = normalize_body(json!([
            {"level": "1", "md5": MD5},
            {"level": "1", "md5": MD5},
        ]))
        .unwrap();
        assert_eq!(body.entries.len(), 2);
    }

    #[test]
    fn test_empty_body_is_valid() {
        let body = normalize_body(json!([])).unwrap();
        assert!(body.entries.is_empty());
        assert_eq!(body.dropped, 0);
    }

    #[test]
    fn test_non_array_body_names_the_type() {
        let err = normalize_body(json!({"oops": true})).unwrap_err();
        match err {
            TableError::BodyShape { actual } => assert_eq!(actual, "object"),
            other => panic!("expected BodyShape, got {other:?}"),
        }

        let err = normalize_body(json!("text")).unwrap_err();
        assert!(matches!(err, TableError::BodyShape { actual: "string" }));
    }
}
