//! Channel-backed sink: the hand-off point to an external transport.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::SinkError;
use crate::payload::EventPayload;
use crate::trait_def::EventSink;

/// A sink that pushes payloads onto a bounded tokio channel.
///
/// The receiving half belongs to whatever transmits events; a full channel
/// makes `submit` wait for room rather than drop.
#[derive(Debug, Clone)]
pub struct QueueSink {
    tx: mpsc::Sender<EventPayload>,
}

impl QueueSink {
    /// Create a sink and the receiver that drains it.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EventPayload>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Wrap an existing sender.
    pub fn from_sender(tx: mpsc::Sender<EventPayload>) -> Self {
        Self { tx }
    }

    /// Check if the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl EventSink for QueueSink {
    async fn submit(&self, payload: EventPayload) -> Result<(), SinkError> {
        debug!(uid = %payload.uid, bytes = payload.len(), "Queueing event");
        self.tx.send(payload).await.map_err(|_| SinkError::Closed)
    }

    fn name(&self) -> &str {
        "QueueSink"
    }
}
