//! `vg history` / `vg clear-history`.

use anyhow::Result;
use vg_core::config::VgConfig;
use vg_core::history::HistoryDb;

/// Opens the configured history database (config override or XDG default).
pub async fn open_history(cfg: &VgConfig) -> Result<HistoryDb> {
    match &cfg.history_db {
        Some(path) => HistoryDb::open_at(path).await,
        None => HistoryDb::open_default().await,
    }
}

pub async fn run_history(cfg: &VgConfig, limit: Option<u32>) -> Result<()> {
    let db = open_history(cfg).await?;
    let entries = db.list(limit).await?;
    if entries.is_empty() {
        println!("No downloads recorded.");
        return Ok(());
    }
    println!("{:<15} {:<32} {}", "RECORDED_MS", "FILENAME", "URL");
    for e in entries {
        println!("{:<15} {:<32} {}", e.recorded_at, e.filename, e.url);
    }
    Ok(())
}

pub async fn run_clear_history(cfg: &VgConfig) -> Result<()> {
    let db = open_history(cfg).await?;
    let n = db.clear().await?;
    println!("Removed {n} history entries.");
    Ok(())
}
