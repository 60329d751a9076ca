//! `vg serve` – host bridge over stdin/stdout.

use anyhow::Result;
use tokio::io::BufReader;
use vg_core::config::VgConfig;

use super::open_history;
use crate::cli::bridge;

pub async fn run_serve(cfg: &VgConfig) -> Result<()> {
    // History is best-effort: detection keeps running without it.
    let history = if cfg.record_history {
        match open_history(cfg).await {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::warn!("download history unavailable: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let stdin = BufReader::new(tokio::io::stdin());
    bridge::run_bridge(cfg, history, stdin, tokio::io::stdout()).await?;
    Ok(())
}
