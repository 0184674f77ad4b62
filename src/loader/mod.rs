//! Load orchestration
//!
//! This module wires the pipeline together: fetch the table URL, sniff the
//! format, unwrap an HTML wrapper page if there is one, decode and validate
//! the header, resolve and fetch the body, normalize it, and hand back a
//! [`Table`]. One load is a single ordered sequence of awaits; independent
//! loads share no mutable state and may run concurrently.

use crate::document::{classify_document, decode_document, extract_header_url, DocumentKind};
use crate::fetch::{build_http_client, fetch_with_retry, FetchedDocument};
use crate::table::{normalize_body, validate_header, Table};
use crate::{Result, TableError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Tunables for a [`Loader`]
///
/// The retry bound is the only parameter of real consequence; the rest
/// exist so operators can identify and bound the client.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Total fetch attempts per URL, including the first. Zero fails
    /// with a configuration error before any I/O.
    pub attempts: u32,

    /// Timeout applied to each individual fetch attempt; it re-arms on
    /// every retry rather than spanning the whole retry budget.
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            attempts: 3,
            request_timeout: Duration::from_secs(30),
            user_agent: format!("bmstable/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Loads tables over HTTP
///
/// Holds the HTTP client so repeated loads reuse connections. Cheap to
/// clone, nothing to tear down.
#[derive(Debug, Clone)]
pub struct Loader {
    client: Client,
    options: LoaderOptions,
}

impl Loader {
    /// Creates a loader with the given options
    pub fn new(options: LoaderOptions) -> Result<Self> {
        let client = build_http_client(&options)?;
        Ok(Loader { client, options })
    }

    /// Loads and normalizes the table at `url`
    ///
    /// The URL may point directly at a header document or at an HTML
    /// wrapper page carrying a `name="bmstable"` marker; the loader
    /// follows the marker in the latter case.
    ///
    /// # Errors
    ///
    /// Any [`TableError`] is terminal for this call. Unusable individual
    /// body elements are not errors; see
    /// [`Table::dropped_entries`](crate::Table::dropped_entries).
    pub async fn load(&self, url: &str) -> Result<Table> {
        let start_url = Url::parse(url)?;
        let attempts = self.options.attempts;

        let first = fetch_with_retry(&self.client, &start_url, attempts).await?;

        let header_doc = match classify_document(first.content_type.as_deref(), &first.body) {
            DocumentKind::Json => first,
            DocumentKind::Html => {
                let header_url = extract_header_url(&first.body, &first.final_url)?;
                tracing::debug!(url = %header_url, "following wrapper page to header");
                fetch_with_retry(&self.client, &header_url, attempts).await?
            }
        };

        let head = validate_header(decode(&header_doc)?)?;

        // dataLocation must resolve against the header's own location
        // before the body phase may start
        let body_url = header_doc.final_url.join(&head.data_location)?;

        let body_doc = fetch_with_retry(&self.client, &body_url, attempts).await?;
        let body = normalize_body(decode(&body_doc)?)?;

        tracing::info!(
            name = %head.name,
            entries = body.entries.len(),
            dropped = body.dropped,
            "table loaded"
        );

        Ok(Table::new(head, body))
    }
}

/// Loads a table with default options
///
/// This is the one-call entry point; construct a [`Loader`] directly to
/// tune retries or reuse connections across loads.
pub async fn load_table(url: &str) -> Result<Table> {
    Loader::new(LoaderOptions::default())?.load(url).await
}

fn decode(doc: &FetchedDocument) -> Result<serde_json::Value> {
    decode_document(&doc.body).map_err(|source| TableError::MalformedDocument {
        url: doc.final_url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LoaderOptions::default();
        assert_eq!(options.attempts, 3);
        assert!(options.user_agent.starts_with("bmstable/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_up_front() {
        let loader = Loader::new(LoaderOptions::default()).unwrap();
        let err = loader.load("not a url").await.unwrap_err();
        assert!(matches!(err, TableError::UrlParse(_)));
    }

    // The full pipeline is exercised end-to-end in tests/load_tests.rs
    // against a wiremock server.
}
