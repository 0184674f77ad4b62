//! Lenient JSON decoding
//!
//! Byte-order marks are invalid in JSON per specification, but broken
//! producers emit them anyway. A single leading U+FEFF is stripped before
//! decoding; there is no other recovery.

use serde_json::Value;

/// Decodes document text into a generic JSON value, tolerating a BOM
///
/// The caller wraps a decode failure into
/// [`TableError::MalformedDocument`](crate::TableError::MalformedDocument)
/// together with the document's URL.
pub fn decode_document(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text.strip_prefix('\u{feff}').unwrap_or(text))
}
