//! URL modeling and filename derivation.
//!
//! Derives a human-readable filename from the last URL path segment. Every
//! failure (unparseable URL, empty path, bad percent-encoding) falls back to
//! [`DEFAULT_FILENAME`], so callers always get a non-empty name.

mod path;
mod percent;

pub use path::last_path_segment;
pub use percent::percent_decode;

/// Filename used when the URL yields nothing usable.
pub const DEFAULT_FILENAME: &str = "video";

/// Derives a display filename for a detected resource.
///
/// Takes the last non-empty path segment and percent-decodes it.
///
/// # Examples
///
/// - `filename_from_url("https://x.com/a%20b.mp4")` → `"a b.mp4"`
/// - `filename_from_url("https://x.com/")` → `"video"`
/// - `filename_from_url("not a url")` → `"video"`
pub fn filename_from_url(url: &str) -> String {
    last_path_segment(url)
        .and_then(|segment| percent_decode(&segment))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}
