//! Header document validation
//!
//! The header is checked for the minimum required shape and nothing more.
//! Unknown fields are never stripped; downstream consumers depend on them.
//! Violations are collected and reported all at once so a header producer
//! sees every problem in a single pass.

use crate::document::value_kind;
use crate::table::Level;
use crate::{Result, TableError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names consumed into typed fields; everything else stays in `extra`
const RECOGNIZED_FIELDS: &[&str] = &[
    "name",
    "symbol",
    "data_url",
    "dataLocation",
    "levels",
    "level_order",
    "levelOrder",
];

/// The collection's metadata
#[derive(Debug, Clone, Serialize)]
pub struct TableHead {
    /// Display name of the table
    pub name: String,

    /// Short symbol prefixed to levels (e.g. "★")
    pub symbol: String,

    /// Location of the body document, relative to the header's own URL
    #[serde(rename = "data_url")]
    pub data_location: String,

    /// Explicit tier ordering, if the header declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Level>>,

    /// Alternate spelling of the same concept; some producers use this
    #[serde(rename = "level_order", skip_serializing_if = "Option::is_none")]
    pub level_order: Option<Vec<Level>>,

    /// Every unrecognized header field, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validates a decoded header document
///
/// Required: `name` (string), `symbol` (string), and a string under
/// `data_url` or `dataLocation`. Optional: `levels` and
/// `level_order`/`levelOrder`, each an array of numbers and strings.
/// Anything else passes through unexamined into [`TableHead::extra`].
///
/// # Errors
///
/// [`TableError::HeaderValidation`] enumerating every violated
/// constraint, not just the first.
pub fn validate_header(value: Value) -> Result<TableHead> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(TableError::HeaderValidation(vec![format!(
                "header is not an object (got {})",
                value_kind(&other)
            )]))
        }
    };

    let mut violations = Vec::new();

    let name = required_string(&map, "name", &mut violations);
    let symbol = required_string(&map, "symbol", &mut violations);

    let data_location = match map.get("data_url").or_else(|| map.get("dataLocation")) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(format!(
                "data_url must be a string (got {})",
                value_kind(other)
            ));
            None
        }
        None => {
            violations.push("missing required field data_url/dataLocation".to_string());
            None
        }
    };

    let levels = optional_levels(&map, "levels", &mut violations);
    let level_order = optional_levels(&map, "level_order", &mut violations)
        .or_else(|| optional_levels(&map, "levelOrder", &mut violations));

    match (name, symbol, data_location) {
        (Some(name), Some(symbol), Some(data_location)) if violations.is_empty() => {
            for field in RECOGNIZED_FIELDS {
                map.remove(*field);
            }

            Ok(TableHead {
                name,
                symbol,
                data_location,
                levels,
                level_order,
                extra: map,
            })
        }
        _ => Err(TableError::HeaderValidation(violations)),
    }
}

fn required_string(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match map.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(format!(
                "{field} must be a string (got {})",
                value_kind(other)
            ));
            None
        }
        None => {
            violations.push(format!("missing required field {field}"));
            None
        }
    }
}

/// Reads an optional array of levels; absent fields are fine, present
/// fields must be arrays of numbers and strings only
fn optional_levels(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<String>,
) -> Option<Vec<Level>> {
    let raw = map.get(field)?;

    let Value::Array(items) = raw else {
        violations.push(format!("{field} must be an array (got {})", value_kind(raw)));
        return None;
    };

    let mut levels = Vec::with_capacity(items.len());
    let mut valid = true;

    for (index, item) in items.iter().enumerate() {
        match Level::from_value(item) {
            Some(level) => levels.push(level),
            None => {
                violations.push(format!(
                    "{field}[{index}] is neither a number nor a string (got {})",
                    value_kind(item)
                ));
                valid = false;
            }
        }
    }

    valid.then_some(levels)
}
