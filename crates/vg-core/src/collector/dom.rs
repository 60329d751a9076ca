//! DOM-observation producer: page-context batches → observations.
//!
//! Items are trusted as media-element sources and are not re-classified.

use crate::model::{Observation, Source};
use crate::protocol::DomItem;
use crate::url_model::filename_from_url;

/// One observation per item with a non-empty URL, in batch order.
pub fn observe_elements(items: &[DomItem]) -> Vec<Observation> {
    items
        .iter()
        .filter(|item| !item.url.is_empty())
        .map(|item| Observation {
            url: item.url.clone(),
            filename: Some(filename_from_url(&item.url)),
            content_type: item.content_type.clone().filter(|ct| !ct.is_empty()),
            size_bytes: None,
            source: Source::Dom,
        })
        .collect()
}
