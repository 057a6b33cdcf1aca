//! Outbound sinks for serialized CoT events.
//!
//! The bridge never talks to a TAK server directly. It hands each serialized
//! event to an [`EventSink`], and whatever sits behind the sink owns delivery.
//!
//! - [`QueueSink`] - Pushes onto a bounded tokio channel for a transport task
//! - [`WriterSink`] - Writes newline-delimited payloads to any async writer
//! - [`RecordingSink`] - Keeps payloads in memory (tests, dry runs)
//!
//! # Example
//!
//! ```rust
//! use cot_sink::{EventPayload, EventSink, QueueSink};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cot_sink::SinkError> {
//!     let (sink, mut rx) = QueueSink::channel(16);
//!
//!     sink.submit(EventPayload::new("inc-1", "<event/>")).await?;
//!
//!     let payload = rx.recv().await.unwrap();
//!     assert_eq!(payload.uid, "inc-1");
//!     Ok(())
//! }
//! ```

mod error;
mod payload;
mod queue;
mod recording;
mod trait_def;
mod writer;

pub use error::SinkError;
pub use payload::EventPayload;
pub use queue::QueueSink;
pub use recording::RecordingSink;
pub use trait_def::EventSink;
pub use writer::WriterSink;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
