//! Per-session counter badge shown by the host.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

use crate::model::SessionId;
use crate::protocol::Outbound;

/// Badge color used when the config does not override it.
pub const DEFAULT_BADGE_COLOR: &str = "#2a7efb";

/// Counter display for one session: blank and uncolored when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Badge {
    pub fn for_count(count: usize, color: &str) -> Self {
        if count == 0 {
            Self {
                text: String::new(),
                color: None,
            }
        } else {
            Self {
                text: count.to_string(),
                color: Some(color.to_string()),
            }
        }
    }
}

/// Receives badge updates after each mutating store operation.
pub trait Indicator: Send {
    fn show(&self, session: SessionId, badge: Badge);
}

/// Discards badge updates (replays, tests, headless use).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndicator;

impl Indicator for NoopIndicator {
    fn show(&self, _session: SessionId, _badge: Badge) {}
}

/// Latest pending badge per session, drained by the host writer.
///
/// Posting replaces any undelivered badge for the same session, so a slow
/// consumer may skip intermediate counts but always ends on the current one.
#[derive(Debug, Default)]
pub struct BadgeBoard {
    pending: Mutex<BTreeMap<SessionId, Badge>>,
    notify: Notify,
}

impl BadgeBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn post(&self, session: SessionId, badge: Badge) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.insert(session, badge).is_some() {
            tracing::trace!(session, "badge coalesced");
        }
        drop(pending);
        self.notify.notify_one();
    }

    /// Removes and returns all pending badges, in session order.
    pub fn take(&self) -> Vec<(SessionId, Badge)> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending).into_iter().collect()
    }

    /// Resolves once a badge has been posted since the last wakeup.
    pub async fn changed(&self) {
        self.notify.notified().await;
    }
}

/// Wire message for one drained badge.
pub fn badge_message(session: SessionId, badge: Badge) -> Outbound {
    Outbound::Badge {
        session_id: session,
        text: badge.text,
        color: badge.color,
    }
}

/// Publishes badge updates to a shared [`BadgeBoard`]. Never blocks.
#[derive(Debug, Clone)]
pub struct BoardIndicator {
    board: Arc<BadgeBoard>,
}

impl BoardIndicator {
    pub fn new(board: Arc<BadgeBoard>) -> Self {
        Self { board }
    }
}

impl Indicator for BoardIndicator {
    fn show(&self, session: SessionId, badge: Badge) {
        self.board.post(session, badge);
    }
}
