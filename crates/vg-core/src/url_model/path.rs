//! Path segment extraction from URLs.

/// Returns the last non-empty path segment of an absolute URL, still
/// percent-encoded.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}
