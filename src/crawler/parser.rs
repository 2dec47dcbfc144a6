//! HTML parser for extracting candidate links
//!
//! Links are read from the configured (tag, attribute) pairs. Parsing is done
//! with html5ever through `scraper`, which recovers from broken markup the
//! same way browsers do, so malformed pages yield fewer links rather than an
//! error.

use crate::config::LinkType;
use scraper::{Html, Selector};

/// Extracts raw link values from an HTML document
///
/// # Ordering
///
/// Link types are scanned in configuration order; within one link type,
/// links follow document order. Duplicates are kept, since de-duplication is
/// the frontier's job.
///
/// # Arguments
///
/// * `html` - The fetched body (decoded lossily as UTF-8)
/// * `link_types` - Tag/attribute pairs to scan
///
/// # Returns
///
/// The attribute values exactly as written in the document
///
/// # Example
///
/// ```
/// use site_mirror::config::LinkType;
/// use site_mirror::crawler::extract_links;
///
/// let html = br#"<a href="/about">About</a><img src="logo.png">"#;
/// let types = vec![LinkType::new("a", "href"), LinkType::new("img", "src")];
/// assert_eq!(extract_links(html, &types), vec!["/about", "logo.png"]);
/// ```
pub fn extract_links(html: &[u8], link_types: &[LinkType]) -> Vec<String> {
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);

    let mut links = Vec::new();
    for link_type in link_types {
        let selector = match Selector::parse(&link_type.selector()) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::debug!("Skipping unusable link type {:?}: {:?}", link_type, e);
                continue;
            }
        };

        let attribute = link_type.attribute_name();
        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(&attribute) {
                links.push(value.to_string());
            }
        }
    }

    links
}
