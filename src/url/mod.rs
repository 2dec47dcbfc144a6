//! URL handling module for Site-Mirror
//!
//! This module provides seed URL validation, link classification and the
//! mapping from remote URLs to local file paths.

mod classify;
mod path_map;

use crate::{UrlError, UrlResult};
use url::Url;

pub use classify::{classify_link, LinkClass};
pub use path_map::map_path;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mirror::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses and validates a seed URL
///
/// A seed must be an absolute `http` or `https` URL with a host, since the
/// host defines both the crawl scope and the name of the mirror root.
///
/// # Examples
///
/// ```
/// use site_mirror::url::parse_seed_url;
///
/// assert!(parse_seed_url("https://example.com/").is_ok());
/// assert!(parse_seed_url("example.com").is_err());
/// assert!(parse_seed_url("ftp://example.com/").is_err());
/// ```
pub fn parse_seed_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}
