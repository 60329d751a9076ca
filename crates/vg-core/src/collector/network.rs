//! Network-observation producer: response metadata → observation.

use crate::classify::is_video_like;
use crate::model::{Observation, Source};
use crate::protocol::HttpHeader;
use crate::url_model::filename_from_url;

/// Builds an observation from one intercepted response, or `None` when the
/// response does not look like video.
///
/// `Content-Type` and `Content-Length` are matched case-insensitively (first
/// occurrence wins). Empty values count as absent; a non-numeric length is
/// omitted.
pub fn observe_response(url: &str, headers: &[HttpHeader]) -> Option<Observation> {
    let content_type = header_value(headers, "content-type");
    if !is_video_like(url, content_type) {
        return None;
    }
    let size_bytes = header_value(headers, "content-length").and_then(parse_content_length);

    Some(Observation {
        url: url.to_string(),
        filename: Some(filename_from_url(url)),
        content_type: content_type.map(str::to_string),
        size_bytes,
        source: Source::Network,
    })
}

fn header_value<'a>(headers: &'a [HttpHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.trim())
        .filter(|v| !v.is_empty())
}

fn parse_content_length(value: &str) -> Option<u64> {
    value.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(name: &str, value: &str) -> HttpHeader {
        HttpHeader {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn extension_match_without_headers() {
        let obs = observe_response("https://x.com/v/clip.mp4?sig=1", &[]).unwrap();
        assert_eq!(obs.filename.as_deref(), Some("clip.mp4"));
        assert_eq!(obs.content_type, None);
        assert_eq!(obs.size_bytes, None);
        assert_eq!(obs.source, Source::Network);
    }

    #[test]
    fn headers_are_case_insensitive() {
        let obs = observe_response(
            "https://x.com/stream",
            &[h("CONTENT-TYPE", "video/webm"), h("Content-length", " 4096 ")],
        )
        .unwrap();
        assert_eq!(obs.content_type.as_deref(), Some("video/webm"));
        assert_eq!(obs.size_bytes, Some(4096));
        assert_eq!(obs.filename.as_deref(), Some("stream"));
    }

    #[test]
    fn non_video_response_is_discarded() {
        assert!(observe_response("https://x.com/index.html", &[h("content-type", "text/html")])
            .is_none());
        assert!(observe_response("https://x.com/blob", &[]).is_none());
    }

    #[test]
    fn bad_length_is_omitted() {
        let obs = observe_response(
            "https://x.com/a.m3u8",
            &[h("content-length", "abc"), h("content-type", "")],
        )
        .unwrap();
        assert_eq!(obs.size_bytes, None);
        assert_eq!(obs.content_type, None);
    }

    #[test]
    fn negative_length_is_omitted() {
        let obs = observe_response("https://x.com/a.mp4", &[h("content-length", "-5")]).unwrap();
        assert_eq!(obs.size_bytes, None);
    }

    #[test]
    fn first_matching_header_wins() {
        let obs = observe_response(
            "https://x.com/a",
            &[h("content-type", "video/mp4"), h("Content-Type", "text/plain")],
        )
        .unwrap();
        assert_eq!(obs.content_type.as_deref(), Some("video/mp4"));
    }
}
