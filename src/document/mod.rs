//! Document classification and decoding
//!
//! This module decides what a fetched response actually is, including:
//! - Format sniffing (header JSON vs HTML wrapper page)
//! - Extracting the header pointer from a wrapper page
//! - Lenient JSON decoding that tolerates a leading byte-order mark

mod decode;
mod pointer;
mod sniff;

pub use decode::decode_document;
pub use pointer::extract_header_url;
pub use sniff::{classify_document, DocumentKind};

use serde_json::Value;

/// Human-readable name of a JSON value's type, for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
