//! Content-type checks for video and HLS playlist responses.

/// HLS playlist MIME types accepted in addition to `video/*`.
const HLS_CONTENT_TYPES: &[&str] = &["application/vnd.apple.mpegurl", "application/x-mpegurl"];

/// True for `video/*`, the known HLS playlist types, or any type mentioning
/// `mpegurl`. Case-insensitive; parameters such as `; charset=` are allowed.
pub fn is_video_content_type(content_type: &str) -> bool {
    let ct = content_type.trim().to_ascii_lowercase();
    if ct.starts_with("video/") {
        return true;
    }
    HLS_CONTENT_TYPES.iter().any(|t| ct.contains(t)) || ct.contains("mpegurl")
}
