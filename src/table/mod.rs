//! The normalized table and its parts
//!
//! This module contains the permissive-but-safe validation of header
//! documents, the per-entry classification and repair of body documents,
//! and the aggregate [`Table`] with its level-order derivation.

mod body;
mod header;

pub use body::{normalize_body, ChecksumIdentity, NormalizedBody, TableEntry};
pub use header::{validate_header, TableHead};

use serde::Serialize;

/// A tier value as it appears in the source documents
///
/// Levels are preserved exactly as given and never coerced, so the number
/// `1` and the string `"1"` are distinct levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Level {
    Number(serde_json::Number),
    Text(String),
}

impl Level {
    /// Reads a level out of a decoded value; anything that is not a
    /// number or a string is rejected
    pub(crate) fn from_value(value: &serde_json::Value) -> Option<Level> {
        match value {
            serde_json::Value::Number(n) => Some(Level::Number(n.clone())),
            serde_json::Value::String(s) => Some(Level::Text(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Number(n) => write!(f, "{n}"),
            Level::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A fully loaded and normalized table
///
/// Constructed once per load and immutable thereafter. Holds no external
/// resources; dropping it is all the teardown there is.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    head: TableHead,
    body: Vec<TableEntry>,
    #[serde(skip)]
    dropped: usize,
}

impl Table {
    pub(crate) fn new(head: TableHead, normalized: NormalizedBody) -> Self {
        Table {
            head,
            body: normalized.entries,
            dropped: normalized.dropped,
        }
    }

    /// The validated header, with all unrecognized fields preserved
    pub fn head(&self) -> &TableHead {
        &self.head
    }

    /// Normalized entries in source order; duplicates are kept
    pub fn body(&self) -> &[TableEntry] {
        &self.body
    }

    /// How many body elements were discarded during normalization
    ///
    /// An empty [`body`](Table::body) with a nonzero count means the
    /// source had entries but none survived filtering; with a zero count
    /// it means the source was genuinely empty.
    pub fn dropped_entries(&self) -> usize {
        self.dropped
    }

    /// Resolves the canonical ordering of the table's tiers
    ///
    /// Priority: a non-empty `levels` in the header is returned verbatim
    /// (never validated against the body); otherwise `level_order`
    /// verbatim; otherwise the distinct `level` values of the body in
    /// first-seen order, with type-sensitive equality.
    ///
    /// Pure with respect to the table's state; repeated calls return
    /// identical results.
    pub fn level_order(&self) -> Vec<Level> {
        if let Some(levels) = &self.head.levels {
            if !levels.is_empty() {
                return levels.clone();
            }
        }

        if let Some(order) = &self.head.level_order {
            return order.clone();
        }

        let mut seen: Vec<Level> = Vec::new();
        for entry in &self.body {
            if !seen.contains(&entry.level) {
                seen.push(entry.level.clone());
            }
        }
        seen
    }
}
