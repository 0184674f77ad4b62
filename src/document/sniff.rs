//! Response format sniffing
//!
//! Upstream servers routinely mislabel or omit Content-Type, so this is a
//! heuristic classifier, not a MIME parser. Matching the behavior of
//! existing de-facto tooling is the correctness target here.

/// The two document formats a table URL can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A header document served directly as JSON
    Json,

    /// An HTML wrapper page pointing at the real header document
    Html,
}

/// Classifies a fetched response as header JSON or an HTML wrapper
///
/// # Rules
///
/// - Content-Type present and containing `json` → JSON
/// - Content-Type absent → first non-whitespace character of the body
///   (after an optional byte-order mark) decides: `{` → JSON, else HTML
/// - Content-Type present but not JSON → HTML
pub fn classify_document(content_type: Option<&str>, body: &str) -> DocumentKind {
    match content_type {
        Some(ct) if ct.contains("json") => DocumentKind::Json,
        Some(_) => DocumentKind::Html,
        None => {
            let text = body.trim_start_matches('\u{feff}').trim_start();
            if text.starts_with('{') {
                DocumentKind::Json
            } else {
                DocumentKind::Html
            }
        }
    }
}
