//! Page scan: resolves `<video>` / `<source>` attributes into a DOM batch.

use std::collections::HashSet;

use url::Url;

use crate::protocol::{DomItem, VideoElement};

/// Collects the `src` of every video element and its `<source>` children,
/// resolved against `base_url`, deduplicated by URL (first wins).
///
/// Empty or unresolvable `src` values are skipped. If `base_url` itself does
/// not parse, only absolute `src` values survive.
pub fn scan_page(base_url: &str, videos: &[VideoElement]) -> Vec<DomItem> {
    let base = Url::parse(base_url).ok();
    let found = videos
        .iter()
        .flat_map(|video| collect_from_video(base.as_ref(), video));
    unique_by_url(found)
}

fn collect_from_video(base: Option<&Url>, video: &VideoElement) -> Vec<DomItem> {
    let own = std::iter::once((video.src.as_deref(), video.mime.as_deref()));
    let children = video
        .sources
        .iter()
        .map(|s| (s.src.as_deref(), s.mime.as_deref()));

    own.chain(children)
        .filter_map(|(src, mime)| {
            let src = src.filter(|s| !s.is_empty())?;
            let url = resolve(base, src)?;
            Some(DomItem {
                url,
                content_type: mime.filter(|m| !m.is_empty()).map(str::to_string),
            })
        })
        .collect()
}

fn resolve(base: Option<&Url>, src: &str) -> Option<String> {
    let resolved = match base {
        Some(base) => base.join(src),
        None => Url::parse(src),
    };
    resolved.ok().map(String::from)
}

fn unique_by_url(items: impl IntoIterator<Item = DomItem>) -> Vec<DomItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url.clone()))
        .collect()
}
