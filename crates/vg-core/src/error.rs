//! Error type for the per-event isolation boundary.

use thiserror::Error;

/// Failure confined to a single host event; the event is skipped and
/// processing continues with the next one.
#[derive(Debug, Error)]
pub enum EventError {
    /// The wire message could not be decoded.
    #[error("malformed event: {0}")]
    Decode(#[from] serde_json::Error),
    /// The collector event loop has shut down.
    #[error("collector event loop is closed")]
    Closed,
}
