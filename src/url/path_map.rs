use std::path::PathBuf;
use url::Url;

const INDEX_FILE: &str = "index.html";

/// Maps a remote URL to its path inside the output directory
///
/// The returned path is relative and always starts with `seed_host`, so the
/// whole mirror lives under a single `<host>/` root. Scheme, host, query and
/// fragment are dropped; path segments become directories.
///
/// # Mapping Rules
///
/// | URL path | Local path |
/// |----------|------------|
/// | `/` (site root) | `<host>/index.html` |
/// | `/docs/` (trailing slash) | `<host>/docs/index.html` |
/// | `/about` (no extension) | `<host>/about.html` |
/// | `/img/logo.png` | `<host>/img/logo.png` |
///
/// The function is pure: the same URL always maps to the same path.
///
/// # Examples
///
/// ```
/// use site_mirror::url::map_path;
/// use std::path::PathBuf;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(map_path(&url, "example.com"), PathBuf::from("example.com/about.html"));
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert_eq!(map_path(&root, "example.com"), PathBuf::from("example.com/index.html"));
/// ```
pub fn map_path(url: &Url, seed_host: &str) -> PathBuf {
    let mut path = PathBuf::from(seed_host);

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    // A trailing slash leaves an empty final segment
    let (last, dirs) = match segments.split_last() {
        Some((last, dirs)) => (*last, dirs),
        None => ("", &[][..]),
    };

    for dir in dirs.iter().filter(|d| is_usable_segment(d)) {
        path.push(dir);
    }

    if !is_usable_segment(last) {
        path.push(INDEX_FILE);
    } else if last.contains('.') {
        path.push(last);
    } else {
        path.push(format!("{}.html", last));
    }

    path
}

fn is_usable_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}
