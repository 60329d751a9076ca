//! `vg replay <path>` – run a recorded event log and print the inventory.

use anyhow::{Context, Result};
use std::path::Path;
use vg_core::action::human_size;
use vg_core::collector::Collector;
use vg_core::store::SessionStore;

pub fn run_replay(path: &Path) -> Result<()> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read event log: {}", path.display()))?;

    let mut collector = Collector::new(SessionStore::default(), None);
    let mut skipped = 0usize;
    for (lineno, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = collector.handle_raw(line) {
            tracing::warn!(line = lineno + 1, "skipping event: {}", e);
            skipped += 1;
        }
    }

    let store = collector.store();
    let sessions = store.session_ids();
    if sessions.is_empty() {
        println!("No videos detected.");
    }
    for session in sessions {
        let items = store.list_resources(session);
        println!("tab {session}: {} video(s)", items.len());
        for r in items {
            let size = r.size_bytes.map(human_size).unwrap_or_else(|| "-".to_string());
            let ct = r.content_type.as_deref().unwrap_or("-");
            println!("  {:<32} {:<10} {:<32} {}", r.filename, size, ct, r.url);
        }
    }
    if skipped > 0 {
        println!("({skipped} malformed event(s) skipped)");
    }
    Ok(())
}
