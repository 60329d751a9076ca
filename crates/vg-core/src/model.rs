//! Resource records and the partial observations merged into them.

use serde::{Deserialize, Serialize};

use crate::url_model::filename_from_url;

/// Host-assigned session (tab) identifier. Negative values mean "no tab".
pub type SessionId = i64;

/// Detection channel that contributed an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Response metadata seen by the network-inspection facility.
    Network,
    /// `<video>` / `<source>` elements found in the page.
    Dom,
}

/// One partial report of a resource from a single detection channel.
///
/// Every optional field is either carried or absent; absent fields never
/// erase what an earlier observation recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub url: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub source: Source,
}

impl Observation {
    pub fn new(url: impl Into<String>, source: Source) -> Self {
        Self {
            url: url.into(),
            filename: None,
            content_type: None,
            size_bytes: None,
            source,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }
}

/// One deduplicated media resource within a session, keyed by `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub url: String,
    /// Never empty.
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Most recent contributing channel.
    pub source: Source,
    /// Unix milliseconds of first insertion; never changes afterwards.
    pub first_seen: i64,
}

impl ResourceRecord {
    /// Builds a fresh record. A missing or empty filename is derived from the URL.
    pub(crate) fn from_observation(obs: Observation, first_seen: i64) -> Self {
        let filename = obs
            .filename
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| filename_from_url(&obs.url));
        Self {
            url: obs.url,
            filename,
            content_type: obs.content_type,
            size_bytes: obs.size_bytes,
            source: obs.source,
            first_seen,
        }
    }

    /// Overwrites every field the observation carries. `url` and `first_seen`
    /// are kept.
    pub(crate) fn merge(&mut self, obs: Observation) {
        debug_assert_eq!(self.url, obs.url);
        if let Some(filename) = obs.filename.filter(|f| !f.is_empty()) {
            self.filename = filename;
        }
        if let Some(content_type) = obs.content_type {
            self.content_type = Some(content_type);
        }
        if let Some(size_bytes) = obs.size_bytes {
            self.size_bytes = Some(size_bytes);
        }
        self.source = obs.source;
    }
}
