//! Per-session inventory of detected video resources.
//!
//! Each session (browser tab) maps URL → [`ResourceRecord`](crate::model::ResourceRecord).
//! Observations for the same URL are merged field by field, so producers
//! may report partial information in any order. Sessions are discarded on
//! navigation and tab close by the collector layer.

mod session;
mod state;

pub use state::SessionStore;
