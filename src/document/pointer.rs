//! Header pointer extraction from HTML wrapper pages
//!
//! A wrapper page carries a marker tag with `name="bmstable"` whose value is
//! the location of the real header document. Deployed wrappers are wildly
//! inconsistent about which attribute carries that value (`content`, `url`,
//! `href`, ...), so the extractor accepts the value regardless of the
//! attribute name it is bound to.

use crate::{Result, TableError};
use scraper::{Html, Selector};
use url::Url;

/// Attribute names observed carrying the pointer value in the wild,
/// checked in this order before falling back to any remaining attribute.
const VALUE_ATTRS: &[&str] = &["content", "url", "href", "value", "src", "data"];

/// Extracts the header document URL from a wrapper page
///
/// Markers are scanned in document order and the first one carrying a
/// usable value wins; additional markers are not an error, they are
/// ignored. The value is resolved against the wrapper page's own URL, so
/// both relative and absolute pointers work.
///
/// # Arguments
///
/// * `html` - The wrapper page's full text
/// * `page_url` - The wrapper page's own URL (after redirects)
///
/// # Returns
///
/// * `Ok(Url)` - Absolute location of the header document
/// * `Err(TableError::MissingPointer)` - No usable marker in the page
pub fn extract_header_url(html: &str, page_url: &Url) -> Result<Url> {
    let document = Html::parse_document(html);

    let pointer = find_pointer(&document).ok_or_else(|| TableError::MissingPointer {
        url: page_url.to_string(),
    })?;

    tracing::debug!(pointer = %pointer, page = %page_url, "found header pointer");

    Ok(page_url.join(&pointer)?)
}

/// Finds the first marker element carrying a pointer value
fn find_pointer(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"[name="bmstable"]"#).ok()?;

    document
        .select(&selector)
        .find_map(|element| pointer_value(element.value()))
}

/// Pulls the pointer value out of a marker element, whatever attribute
/// it is bound to
fn pointer_value(element: &scraper::node::Element) -> Option<String> {
    for attr in VALUE_ATTRS {
        if let Some(value) = element.attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    // Unrecognized attribute name; take whatever non-empty value is left
    element
        .attrs()
        .find(|(name, value)| *name != "name" && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/table/index.html").unwrap()
    }

    #[test]
    fn test_extract_meta_content() {
        let html = r#"<html><head><meta name="bmstable" content="header.json"></head></html>"#;
        let url = extract_header_url(html, &page_url()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/table/header.json");
    }

    #[test]
    fn test_extract_absolute_pointer() {
        let html =
            r#"<html><head><meta name="bmstable" content="https://other.com/h.json"></head></html>"#;
        let url = extract_header_url(html, &page_url()).unwrap();
        assert_eq!(url.as_str(), "https://other.com/h.json");
    }

    #[test]
    fn test_extract_nonstandard_attribute_name() {
        // Real wrappers disagree on the attribute carrying the value
        let html = r#"<html><head><meta name="bmstable" url="header.json"></head></html>"#;
        let url = extract_header_url(html, &page_url()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/table/header.json");
    }

    #[test]
    fn test_extract_unknown_attribute_name() {
        let html = r#"<html><head><meta name="bmstable" headerpath="header.json"></head></html>"#;
        let url = extract_header_url(html, &page_url()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/table/header.json");
    }

    #[test]
    fn test_first_usable_marker_wins() {
        let html = r#"<html><head>
            <meta name="bmstable" content="first.json">
            <meta name="bmstable" content="second.json">
        </head></html>"#;
        let url = extract_header_url(html, &page_url()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/table/first.json");
    }

    #[test]
    fn test_missing_marker() {
        let html = r#"<html><head><meta name="description" content="no table"></head></html>"#;
        let err = extract_header_url(html, &page_url()).unwrap_err();
        match err {
            TableError::MissingPointer { url } => {
                assert_eq!(url, "https://example.com/table/index.html");
            }
            other => panic!("expected MissingPointer, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_with_empty_value_is_missing() {
        let html = r#"<html><head><meta name="bmstable" content=""></head></html>"#;
        assert!(extract_header_url(html, &page_url()).is_err());
    }
}
