//! Collector endpoints: the producers feeding the session store, the
//! navigation/teardown hooks, and the read/action queries.
//!
//! Every inbound event funnels through [`Collector::handle`]; the two
//! producers only ever touch the store via `record_observation`.

mod dom;
mod network;
mod scan;

pub use dom::observe_elements;
pub use network::observe_response;
pub use scan::scan_page;

use crate::action::plan_menu_action;
use crate::error::EventError;
use crate::history::HistorySender;
use crate::model::SessionId;
use crate::protocol::{decode_event, DomItem, HostEvent, HttpHeader, Outbound, TabStatus};
use crate::store::SessionStore;

pub struct Collector {
    store: SessionStore,
    history: Option<HistorySender>,
}

impl Collector {
    /// `history` is `None` when download recording is disabled.
    pub fn new(store: SessionStore, history: Option<HistorySender>) -> Self {
        Self { store, history }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Decodes and handles one wire message. A decode failure affects only
    /// this message.
    pub fn handle_raw(&mut self, raw: &str) -> Result<Option<Outbound>, EventError> {
        let event = decode_event(raw)?;
        Ok(self.handle(event))
    }

    /// Applies one host event and returns the reply owed to the host, if any.
    pub fn handle(&mut self, event: HostEvent) -> Option<Outbound> {
        match event {
            HostEvent::ResponseHeaders {
                session_id,
                url,
                response_headers,
                ..
            } => {
                self.on_response(session_id, &url, &response_headers);
                None
            }
            HostEvent::VideoElements { session_id, items } => {
                let Some(session_id) = session_id else {
                    tracing::debug!(count = items.len(), "video elements from outside a tab dropped");
                    return None;
                };
                self.on_video_elements(session_id, &items);
                Some(Outbound::Ack { ok: true })
            }
            HostEvent::PageScan {
                session_id,
                base_url,
                videos,
            } => {
                let items = scan_page(&base_url, &videos);
                self.on_video_elements(session_id, &items);
                Some(Outbound::Ack { ok: true })
            }
            HostEvent::TabUpdated { session_id, status } => {
                if status == Some(TabStatus::Loading) {
                    self.on_navigation_started(session_id);
                }
                None
            }
            HostEvent::TabRemoved { session_id } => {
                self.on_session_closed(session_id);
                None
            }
            HostEvent::GetVideos { session_id } => Some(Outbound::Videos {
                items: self.store.list_resources(session_id),
            }),
            HostEvent::RecordDownload { record } => {
                match &self.history {
                    Some(history) => history.record(record),
                    None => tracing::debug!(url = %record.url, "download history disabled"),
                }
                Some(Outbound::Ack { ok: true })
            }
            HostEvent::ContextMenu {
                session_id,
                menu_item_id,
            } => {
                let items = self.store.list_resources(session_id);
                Some(Outbound::Action {
                    action: plan_menu_action(menu_item_id, &items),
                })
            }
        }
    }

    /// Network producer.
    pub fn on_response(&mut self, session: SessionId, url: &str, headers: &[HttpHeader]) {
        if session < 0 {
            return;
        }
        match observe_response(url, headers) {
            Some(obs) => self.store.record_observation(session, obs),
            None => tracing::trace!(session, url, "response is not video"),
        }
    }

    /// DOM producer.
    pub fn on_video_elements(&mut self, session: SessionId, items: &[DomItem]) {
        for obs in observe_elements(items) {
            self.store.record_observation(session, obs);
        }
    }

    /// The session's page started loading: its inventory is stale.
    pub fn on_navigation_started(&mut self, session: SessionId) {
        self.store.clear_session(session);
    }

    /// The session's tab is gone.
    pub fn on_session_closed(&mut self, session: SessionId) {
        self.store.drop_session(session);
    }
}
