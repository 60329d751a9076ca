//! Session store: per-session resource maps and their lifecycle.

use std::collections::HashMap;

use crate::clock::{Clock, SystemClock};
use crate::indicator::{Badge, Indicator, NoopIndicator, DEFAULT_BADGE_COLOR};
use crate::model::{Observation, ResourceRecord, SessionId};

use super::session::SessionResources;

/// Owns every session's records and the merge / read / clear operations.
///
/// A session exists only while it has at least one record; there is no
/// explicit create. Negative session ids are outside any tab and ignored.
pub struct SessionStore {
    sessions: HashMap<SessionId, SessionResources>,
    clock: Box<dyn Clock>,
    indicator: Box<dyn Indicator>,
    badge_color: String,
}

impl SessionStore {
    pub fn new(
        clock: Box<dyn Clock>,
        indicator: Box<dyn Indicator>,
        badge_color: impl Into<String>,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            clock,
            indicator,
            badge_color: badge_color.into(),
        }
    }

    /// Merges one observation into the session, creating it if needed, and
    /// publishes the new count.
    pub fn record_observation(&mut self, session: SessionId, obs: Observation) {
        if session < 0 {
            tracing::debug!(session, url = %obs.url, "observation outside any tab dropped");
            return;
        }
        let now = self.clock.now_millis();
        let url = obs.url.clone();
        let created = self.sessions.entry(session).or_default().upsert(obs, now);
        if created {
            tracing::debug!(session, %url, "new resource");
        }
        self.publish_badge(session);
    }

    /// Records of the session ordered by `first_seen` (ties in insertion
    /// order). Empty for unknown sessions.
    pub fn list_resources(&self, session: SessionId) -> Vec<ResourceRecord> {
        self.sessions
            .get(&session)
            .map(SessionResources::sorted)
            .unwrap_or_default()
    }

    pub fn count(&self, session: SessionId) -> usize {
        self.sessions.get(&session).map_or(0, SessionResources::len)
    }

    /// Ids of all non-empty sessions, ascending.
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Discards the session (navigation started). Always publishes the reset
    /// badge, even if the session held nothing.
    pub fn clear_session(&mut self, session: SessionId) {
        if session < 0 {
            return;
        }
        if let Some(old) = self.sessions.remove(&session) {
            tracing::debug!(session, discarded = old.len(), "session cleared");
        }
        self.publish_badge(session);
    }

    /// Discards the session without touching the badge (tab is gone).
    pub fn drop_session(&mut self, session: SessionId) {
        if self.sessions.remove(&session).is_some() {
            tracing::debug!(session, "session dropped");
        }
    }

    fn publish_badge(&self, session: SessionId) {
        let badge = Badge::for_count(self.count(session), &self.badge_color);
        self.indicator.show(session, badge);
    }
}

impl Default for SessionStore {
    /// Wall clock, no indicator, default badge color.
    fn default() -> Self {
        Self::new(
            Box::new(SystemClock),
            Box::new(NoopIndicator),
            DEFAULT_BADGE_COLOR,
        )
    }
}
