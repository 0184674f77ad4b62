//! HTTP fetcher with bounded retry
//!
//! This module handles all HTTP requests for the loader, including:
//! - Building an HTTP client with user agent and per-request timeout
//! - GET requests with retry on non-success status
//! - Error classification into [`TableError`] variants

use crate::loader::LoaderOptions;
use crate::{Result, TableError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use url::Url;

/// A successfully fetched document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects; relative references in the document
    /// resolve against this, not the URL originally requested
    pub final_url: Url,

    /// HTTP status code (always 200 for a returned document)
    pub status: u16,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Decoded body text
    pub body: String,
}

/// Builds the HTTP client used for every fetch of a load operation
///
/// The timeout is set on the client, so it applies to each request
/// individually and re-arms on every retry attempt.
pub fn build_http_client(options: &LoaderOptions) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(options.user_agent.clone())
        .timeout(options.request_timeout)
        .connect_timeout(options.request_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying on any non-200 status
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Return immediately |
/// | Any other status | Retry, up to `attempts` total |
/// | Connect/timeout/TLS error | Immediate [`TableError::Http`] |
///
/// Retries are immediate; there is no delay between attempts. When all
/// attempts are exhausted, fails with [`TableError::Transport`] carrying
/// the last observed status code.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `attempts` - Total attempts including the first; zero is a
///   [`TableError::Configuration`] error
pub async fn fetch_with_retry(client: &Client, url: &Url, attempts: u32) -> Result<FetchedDocument> {
    if attempts == 0 {
        return Err(TableError::Configuration(
            "fetch attempts must be at least 1".to_string(),
        ));
    }

    let mut last_status = 0u16;

    for attempt in 1..=attempts {
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| TableError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            let final_url = response.url().clone();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let body = response.text().await.map_err(|source| TableError::Http {
                url: url.to_string(),
                source,
            })?;

            tracing::debug!(url = %final_url, status = status.as_u16(), "fetched document");

            return Ok(FetchedDocument {
                final_url,
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        last_status = status.as_u16();
        tracing::warn!(
            url = %url,
            status = last_status,
            attempt,
            attempts,
            "fetch attempt failed"
        );
    }

    Err(TableError::Transport {
        url: url.to_string(),
        status: last_status,
        attempts,
    })
}
