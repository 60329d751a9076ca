//! Event loop owning the collector.
//!
//! One task owns the [`Collector`] and applies events strictly in arrival
//! order, so the store has a single writer and needs no locks. Producers
//! and readers hold a cloneable [`CollectorHandle`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::collector::Collector;
use crate::error::EventError;
use crate::protocol::{HostEvent, Outbound};

/// One queued event, with an optional reply slot.
#[derive(Debug)]
pub struct Envelope {
    pub event: HostEvent,
    pub reply: Option<oneshot::Sender<Option<Outbound>>>,
}

#[derive(Debug, Clone)]
pub struct CollectorHandle {
    tx: mpsc::Sender<Envelope>,
}

impl CollectorHandle {
    /// Queues an event without waiting for it to be applied.
    pub async fn submit(&self, event: HostEvent) -> Result<(), EventError> {
        self.tx
            .send(Envelope { event, reply: None })
            .await
            .map_err(|_| EventError::Closed)
    }

    /// Queues an event and waits for its reply.
    pub async fn request(&self, event: HostEvent) -> Result<Option<Outbound>, EventError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| EventError::Closed)?;
        reply_rx.await.map_err(|_| EventError::Closed)
    }
}

/// Spawns the event loop. It ends when every handle is dropped and hands
/// the collector back through the join handle.
pub fn spawn_collector(collector: Collector, capacity: usize) -> (CollectorHandle, JoinHandle<Collector>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(run_collector_loop(rx, collector));
    (CollectorHandle { tx }, handle)
}

async fn run_collector_loop(mut rx: mpsc::Receiver<Envelope>, mut collector: Collector) -> Collector {
    while let Some(Envelope { event, reply }) = rx.recv().await {
        let out = collector.handle(event);
        if let Some(reply) = reply {
            // The requester may have given up; nothing to do then.
            let _ = reply.send(out);
        }
    }
    tracing::debug!("collector event loop finished");
    collector
}
