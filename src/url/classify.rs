use crate::url::extract_host;
use url::Url;

/// Classification of a link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Same-site link, resolved to an absolute URL without fragment
    Local(Url),
    /// Link that leaves the seed host or cannot be fetched from it
    Foreign,
    /// Link containing one of the configured exclude patterns
    Excluded,
    /// Empty or whitespace-only link
    Empty,
}

/// Classifies a raw link found on a page
///
/// Rules are applied in order:
/// 1. Empty or whitespace-only → `Empty`
/// 2. Contains any exclude pattern as a substring → `Excluded`
/// 3. No `http://`/`https://` prefix → resolved against `page_url`
/// 4. Absolute or resolved link on `seed_host` → `Local`, otherwise `Foreign`
///
/// Relative links are resolved the way a browser would, so `other.html` found
/// on `/docs/page.html` becomes `/docs/other.html`. Resolution that produces a
/// different host (`//cdn.example.net/x`) or a non-web scheme
/// (`javascript:void(0)`) yields `Foreign`.
///
/// # Examples
///
/// ```
/// use site_mirror::url::{classify_link, LinkClass};
/// use url::Url;
///
/// let page = Url::parse("https://example.com/").unwrap();
/// let exclude = vec!["mailto:".to_string()];
///
/// assert!(matches!(
///     classify_link("/about", &page, "example.com", &exclude),
///     LinkClass::Local(_)
/// ));
/// assert_eq!(
///     classify_link("mailto:x@x.com", &page, "example.com", &exclude),
///     LinkClass::Excluded
/// );
/// assert_eq!(
///     classify_link("https://external.com/", &page, "example.com", &exclude),
///     LinkClass::Foreign
/// );
/// ```
pub fn classify_link(
    raw: &str,
    page_url: &Url,
    seed_host: &str,
    exclude_patterns: &[String],
) -> LinkClass {
    let link = raw.trim();

    if link.is_empty() {
        return LinkClass::Empty;
    }

    if exclude_patterns
        .iter()
        .any(|pattern| link.contains(pattern.as_str()))
    {
        return LinkClass::Excluded;
    }

    let resolved = if has_web_scheme(link) {
        Url::parse(link)
    } else {
        page_url.join(link)
    };

    let mut url = match resolved {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Unresolvable link {} on {}: {}", link, page_url, e);
            return LinkClass::Foreign;
        }
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return LinkClass::Foreign;
    }

    if extract_host(&url).as_deref() != Some(seed_host) {
        return LinkClass::Foreign;
    }

    url.set_fragment(None);
    LinkClass::Local(url)
}

fn has_web_scheme(link: &str) -> bool {
    let prefix: String = link.chars().take(8).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("http://") || prefix.starts_with("https://")
}
