//! Wire messages exchanged with the host runtime, one JSON object per
//! message, tagged by `kind`.

use serde::{Deserialize, Serialize};

use crate::action::{Action, MenuItem};
use crate::error::EventError;
use crate::model::{ResourceRecord, SessionId};

/// One response header as delivered by the network-inspection facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// A media URL gathered by the page-context collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomItem {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Raw attributes of a `<video>` element and its `<source>` children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoElement {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, rename = "type")]
    pub mime: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceElement {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, rename = "type")]
    pub mime: Option<String>,
}

/// Tab loading status reported on tab updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
    #[serde(other)]
    Other,
}

/// Download the user started from the list UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Messages from the host into the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostEvent {
    /// Response metadata for any intercepted request.
    #[serde(rename_all = "camelCase")]
    ResponseHeaders {
        session_id: SessionId,
        url: String,
        #[serde(default)]
        response_headers: Vec<HttpHeader>,
        #[serde(default, rename = "type")]
        resource_type: Option<String>,
    },
    /// Batch from the page-context collector. No session means the sender
    /// is not a tab.
    #[serde(rename_all = "camelCase")]
    VideoElements {
        #[serde(default)]
        session_id: Option<SessionId>,
        #[serde(default)]
        items: Vec<DomItem>,
    },
    /// Unresolved element attributes; resolved against `base_url` here.
    #[serde(rename_all = "camelCase")]
    PageScan {
        session_id: SessionId,
        base_url: String,
        #[serde(default)]
        videos: Vec<VideoElement>,
    },
    #[serde(rename_all = "camelCase")]
    TabUpdated {
        session_id: SessionId,
        #[serde(default)]
        status: Option<TabStatus>,
    },
    #[serde(rename_all = "camelCase")]
    TabRemoved { session_id: SessionId },
    #[serde(rename_all = "camelCase")]
    GetVideos { session_id: SessionId },
    RecordDownload { record: DownloadRequest },
    #[serde(rename_all = "camelCase")]
    ContextMenu {
        session_id: SessionId,
        menu_item_id: MenuItem,
    },
}

/// Messages from the collector back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outbound {
    Videos { items: Vec<ResourceRecord> },
    Ack { ok: bool },
    #[serde(rename_all = "camelCase")]
    Badge {
        session_id: SessionId,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Action { action: Option<Action> },
}

/// Decodes one wire message.
pub fn decode_event(raw: &str) -> Result<HostEvent, EventError> {
    Ok(serde_json::from_str(raw.trim())?)
}

/// Encodes one outbound message as a single line (no trailing newline).
pub fn encode_outbound(msg: &Outbound) -> Result<String, EventError> {
    Ok(serde_json::to_string(msg)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_response_headers() {
        let ev = decode_event(
            r#"{"kind":"responseHeaders","sessionId":3,"url":"https://x.com/a.mp4",
                "responseHeaders":[{"name":"Content-Type","value":"video/mp4"}],"type":"media"}"#,
        )
        .unwrap();
        match ev {
            HostEvent::ResponseHeaders {
                session_id,
                url,
                response_headers,
                resource_type,
            } => {
                assert_eq!(session_id, 3);
                assert_eq!(url, "https://x.com/a.mp4");
                assert_eq!(response_headers.len(), 1);
                assert_eq!(resource_type.as_deref(), Some("media"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decode_video_elements_without_session() {
        let ev = decode_event(r#"{"kind":"videoElements","items":[{"url":"https://x.com/v"}]}"#)
            .unwrap();
        assert_eq!(
            ev,
            HostEvent::VideoElements {
                session_id: None,
                items: vec![DomItem {
                    url: "https://x.com/v".into(),
                    content_type: None
                }],
            }
        );
    }

    #[test]
    fn decode_tab_updated_unknown_status() {
        let ev = decode_event(r#"{"kind":"tabUpdated","sessionId":1,"status":"unloaded"}"#).unwrap();
        assert_eq!(
            ev,
            HostEvent::TabUpdated {
                session_id: 1,
                status: Some(TabStatus::Other)
            }
        );
    }

    #[test]
    fn decode_page_scan_type_attribute() {
        let ev = decode_event(
            r#"{"kind":"pageScan","sessionId":2,"baseUrl":"https://x.com/p/",
                "videos":[{"src":"a.mp4","type":"video/mp4","sources":[{"src":"b.webm"}]}]}"#,
        )
        .unwrap();
        match ev {
            HostEvent::PageScan { videos, .. } => {
                assert_eq!(videos[0].mime.as_deref(), Some("video/mp4"));
                assert_eq!(videos[0].sources[0].src.as_deref(), Some("b.webm"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_garbage_and_unknown_kind() {
        assert!(matches!(decode_event("{not json"), Err(EventError::Decode(_))));
        assert!(decode_event(r#"{"kind":"selfDestruct"}"#).is_err());
        assert!(decode_event(r#"{"kind":"getVideos"}"#).is_err());
    }

    #[test]
    fn encode_badge_line() {
        let line = encode_outbound(&Outbound::Badge {
            session_id: 4,
            text: String::new(),
            color: None,
        })
        .unwrap();
        assert_eq!(line, r#"{"kind":"badge","sessionId":4,"text":""}"#);
    }

    #[test]
    fn encode_videos_reply() {
        let line = encode_outbound(&Outbound::Videos { items: vec![] }).unwrap();
        assert_eq!(line, r#"{"kind":"videos","items":[]}"#);
    }
}
