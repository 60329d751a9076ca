//! Stdio bridge: one JSON message per line in each direction.
//! Malformed input lines (bad UTF-8 or bad JSON) are logged and skipped.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vg_core::clock::SystemClock;
use vg_core::collector::Collector;
use vg_core::config::VgConfig;
use vg_core::history::{spawn_history_writer, HistoryDb};
use vg_core::indicator::{badge_message, BadgeBoard, BoardIndicator};
use vg_core::protocol::{decode_event, encode_outbound, Outbound};
use vg_core::runtime::{spawn_collector, CollectorHandle};
use vg_core::store::SessionStore;

/// Runs the collector between `reader` and `writer` until input ends.
///
/// Shutdown always completes, even when reading fails: the collector is
/// stopped, queued history entries are flushed, then pending output and
/// badges are written. Returns the number of skipped input lines.
pub async fn run_bridge<R, W>(
    cfg: &VgConfig,
    history: Option<HistoryDb>,
    reader: R,
    writer: W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let capacity = cfg.event_queue_capacity.max(1);
    let (out_tx, out_rx) = mpsc::channel(capacity);
    let board = BadgeBoard::new();
    let writer_task = spawn_writer(writer, out_rx, board.clone());

    let (history, history_task) = match history {
        Some(db) => {
            let (sender, task) = spawn_history_writer(db, cfg.history_queue_capacity);
            (Some(sender), Some(task))
        }
        None => (None, None),
    };

    let store = SessionStore::new(
        Box::new(SystemClock),
        Box::new(BoardIndicator::new(board)),
        cfg.badge_color.clone(),
    );
    let (handle, collector_task) = spawn_collector(Collector::new(store, history), capacity);
    tracing::info!("host bridge ready");

    let pumped = pump_lines(reader, &handle, &out_tx).await;
    if let Err(e) = &pumped {
        tracing::error!("host input failed: {:#}", e);
    }

    // Collector first (holds the history sender and the badge board), then
    // the history writer, then output.
    drop(handle);
    let collector = collector_task.await.context("collector task join")?;
    drop(collector);
    if let Some(task) = history_task {
        task.await.context("history writer join")?;
    }
    drop(out_tx);
    writer_task.await.context("output writer join")?;

    let skipped = pumped?;
    tracing::info!(skipped, "host bridge stopped");
    Ok(skipped)
}

/// Writes outbound messages one per line. Badges are drained from `board`
/// as they change and once more after the reply channel closes, so the last
/// badge written for a session is its current count.
pub fn spawn_writer<W>(
    mut out: W,
    mut rx: mpsc::Receiver<Outbound>,
    board: Arc<BadgeBoard>,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => {
                        if !write_message(&mut out, &msg).await {
                            return;
                        }
                    }
                    None => break,
                },
                _ = board.changed() => {
                    if !write_badges(&mut out, &board).await {
                        return;
                    }
                }
            }
        }
        write_badges(&mut out, &board).await;
    })
}

async fn write_badges<W: AsyncWrite + Unpin>(out: &mut W, board: &BadgeBoard) -> bool {
    for (session, badge) in board.take() {
        if !write_message(out, &badge_message(session, badge)).await {
            return false;
        }
    }
    true
}

/// Returns false once the output is closed.
async fn write_message<W: AsyncWrite + Unpin>(out: &mut W, msg: &Outbound) -> bool {
    let mut line = match encode_outbound(msg) {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!("encode outbound message: {}", e);
            return true;
        }
    };
    line.push('\n');
    if let Err(e) = out.write_all(line.as_bytes()).await {
        tracing::debug!("output closed: {}", e);
        return false;
    }
    let _ = out.flush().await;
    true
}

/// Reads host messages line by line, forwards each to the collector in
/// order, and queues any reply. Returns the number of skipped lines.
pub async fn pump_lines<R>(
    mut reader: R,
    handle: &CollectorHandle,
    out: &mpsc::Sender<Outbound>,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut skipped = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(l) => l.trim(),
            Err(e) => {
                tracing::warn!("skipping host message: not UTF-8: {}", e);
                skipped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        let event = match decode_event(line) {
            Ok(ev) => ev,
            Err(e) => {
                tracing::warn!("skipping host message: {}", e);
                skipped += 1;
                continue;
            }
        };
        if let Some(reply) = handle.request(event).await? {
            if out.send(reply).await.is_err() {
                tracing::debug!("outbound writer gone; stopping input");
                break;
            }
        }
    }
    Ok(skipped)
}
