//! `vg classify <url>` – classifier verdict and derived filename.

use vg_core::classify::is_video_like;
use vg_core::url_model::filename_from_url;

pub fn run_classify(url: &str, content_type: Option<&str>) {
    let verdict = if is_video_like(url, content_type) {
        "video"
    } else {
        "not video"
    };
    println!("{verdict}");
    println!("filename: {}", filename_from_url(url));
}
