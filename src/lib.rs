//! bmstable: a lenient loader for difficulty table documents
//!
//! This crate fetches a "bmstable" ranking table (a JSON header describing
//! the collection, plus a JSON body listing individual charts) from an
//! arbitrary HTTP endpoint and normalizes it into an in-memory [`Table`].
//! Upstream documents are frequently malformed or inconsistently typed, so
//! every stage is permissive where it can be and fails loudly where it must.

pub mod document;
pub mod fetch;
pub mod loader;
pub mod table;

use thiserror::Error;

/// Main error type for table loading operations
///
/// Every variant is terminal for the `load` call that produced it.
/// Per-element problems inside a body document are never errors; bad
/// elements are silently dropped during normalization.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{attempts} attempts for {url} exhausted, last status {status}")]
    Transport {
        url: String,
        status: u16,
        attempts: u32,
    },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("no name=\"bmstable\" marker in wrapper page at {url}")]
    MissingPointer { url: String },

    #[error("malformed document at {url}: {source}")]
    MalformedDocument {
        url: String,
        source: serde_json::Error,
    },

    #[error("header validation failed: {}", .0.join("; "))]
    HeaderValidation(Vec<String>),

    #[error("body document is not an array (got {actual})")]
    BodyShape { actual: &'static str },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for table loading operations
pub type Result<T> = std::result::Result<T, TableError>;

// Re-export commonly used types
pub use loader::{load_table, Loader, LoaderOptions};
pub use table::{ChecksumIdentity, Level, Table, TableEntry, TableHead};
