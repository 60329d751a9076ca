//! Download history log.
//!
//! Append-only, newest first. Lives outside the session store: the store
//! only hands entries to a [`HistorySender`], which persists them on a
//! background task.

mod db;
mod writer;

pub use db::{HistoryDb, HistoryEntry};
pub use writer::{spawn_history_writer, HistorySender};
