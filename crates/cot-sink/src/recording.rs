//! In-memory sink.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::SinkError;
use crate::payload::EventPayload;
use crate::trait_def::EventSink;

/// A sink that keeps every payload it is given.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// producer and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    payloads: Arc<Mutex<Vec<EventPayload>>>,
    reject: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every payload. Useful for exercising error paths.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    /// Snapshot of everything submitted so far.
    pub fn payloads(&self) -> Vec<EventPayload> {
        self.payloads
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.payloads.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn submit(&self, payload: EventPayload) -> Result<(), SinkError> {
        if self.reject {
            return Err(SinkError::Rejected(payload.uid));
        }
        self.payloads
            .lock()
            .map_err(|_| SinkError::Rejected("recording buffer poisoned".to_string()))?
            .push(payload);
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingSink"
    }
}
