//! Background writer so recording a download never waits on SQLite.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::clock::unix_millis;
use crate::protocol::DownloadRequest;

use super::HistoryDb;

#[derive(Debug)]
struct PendingEntry {
    url: String,
    filename: String,
    recorded_at: i64,
}

/// Submission side of the history writer. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HistorySender {
    tx: mpsc::Sender<PendingEntry>,
}

impl HistorySender {
    /// Queues one entry stamped with the current time. Never blocks; if the
    /// queue is full or the writer is gone the entry is dropped and logged.
    pub fn record(&self, request: DownloadRequest) {
        let entry = PendingEntry {
            url: request.url,
            filename: request.filename,
            recorded_at: unix_millis(),
        };
        if let Err(e) = self.tx.try_send(entry) {
            tracing::warn!("download history entry dropped: {}", e);
        }
    }
}

/// Spawns the writer task. It exits once every sender is dropped and the
/// queue is drained; await the handle to flush on shutdown.
pub fn spawn_history_writer(db: HistoryDb, capacity: usize) -> (HistorySender, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(run_history_writer(rx, db));
    (HistorySender { tx }, handle)
}

async fn run_history_writer(mut rx: mpsc::Receiver<PendingEntry>, db: HistoryDb) {
    while let Some(entry) = rx.recv().await {
        if let Err(e) = db
            .record(&entry.url, &entry.filename, entry.recorded_at)
            .await
        {
            tracing::warn!(url = %entry.url, "download history write failed: {:#}", e);
        }
    }
}
