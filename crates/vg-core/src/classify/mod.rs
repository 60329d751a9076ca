//! Video resource classification.
//!
//! Decides whether a URL / content-type pair looks like a video resource.
//! Pure and deterministic; holds no state.

mod content_type;

pub use content_type::is_video_content_type;

/// File extensions treated as video, compared case-insensitively.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "m3u8", "mov", "m4v"];

/// True if the URL or the content type identifies a video resource.
///
/// A matching path extension is sufficient on its own; a missing content
/// type never disqualifies it. Otherwise the content type decides.
pub fn is_video_like(url: &str, content_type: Option<&str>) -> bool {
    if has_video_extension(url) {
        return true;
    }
    content_type.map(is_video_content_type).unwrap_or(false)
}

/// True if the URL path ends in one of [`VIDEO_EXTENSIONS`].
///
/// Query string and fragment are ignored. Strings that do not parse as an
/// absolute URL are checked up to their first `?` or `#`.
pub fn has_video_extension(url: &str) -> bool {
    // Only the path counts: `watch?file=b.mp4` is a page, not a video.
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => strip_query_and_fragment(url).to_string(),
    };
    path_extension(&path)
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn strip_query_and_fragment(raw: &str) -> &str {
    raw.split(['?', '#']).next().unwrap_or(raw)
}

/// Extension of the final path component, if any.
fn path_extension(path: &str) -> Option<&str> {
    let (_, ext) = path.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match() {
        assert!(is_video_like("https://x.com/a.mp4", None));
        assert!(is_video_like("https://x.com/a.mp4?x=1", None));
        assert!(is_video_like("https://x.com/live/index.m3u8#t=3", None));
        assert!(is_video_like("https://x.com/CLIP.MOV", None));
        for ext in VIDEO_EXTENSIONS {
            assert!(is_video_like(&format!("https://x.com/v.{ext}"), None), "{ext}");
        }
    }

    #[test]
    fn content_type_match() {
        assert!(is_video_like("https://x.com/a.bin", Some("video/mp4")));
        assert!(is_video_like(
            "https://x.com/playlist",
            Some("application/vnd.apple.mpegurl")
        ));
        assert!(!is_video_like("https://x.com/a.bin", Some("text/html")));
    }

    #[test]
    fn no_signal() {
        assert!(!is_video_like("https://x.com/a.bin", None));
        assert!(!is_video_like("https://x.com/", None));
        assert!(!is_video_like("https://x.com/mp4", None));
    }

    #[test]
    fn extension_must_end_the_path() {
        assert!(!is_video_like("https://x.com/a.mp4/thumb.jpg", None));
        assert!(!is_video_like("https://x.com/a.mp4x", None));
        assert!(!is_video_like("https://x.com/dir.mp4/", None));
    }

    #[test]
    fn query_does_not_count_as_path() {
        assert!(!is_video_like("https://x.com/watch?file=b.mp4", None));
    }

    #[test]
    fn extension_wins_over_unrelated_content_type() {
        assert!(is_video_like("https://x.com/a.webm", Some("application/octet-stream")));
    }

    #[test]
    fn unparseable_url_checks_raw_path() {
        assert!(has_video_extension("/relative/clip.mp4?x=1"));
        assert!(!has_video_extension("not a url"));
    }
}
