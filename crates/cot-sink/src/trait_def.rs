//! The EventSink trait definition.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::payload::EventPayload;

/// A destination for serialized events.
///
/// Sinks must accept submissions from many producers and preserve FIFO
/// order per producer. This trait is object-safe and can be used with
/// `Arc<dyn EventSink>`.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hand one payload to the sink.
    async fn submit(&self, payload: EventPayload) -> Result<(), SinkError>;

    /// Get a human-readable name for this sink.
    fn name(&self) -> &str;

    /// Flush anything buffered.
    ///
    /// Default implementation does nothing.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
