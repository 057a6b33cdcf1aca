//! Error types for sink operations.

use thiserror::Error;

/// Errors that can occur while handing an event to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The consumer side of the sink has gone away.
    #[error("sink closed")]
    Closed,

    /// Writing the payload failed.
    #[error("sink I/O: {0}")]
    Io(#[from] std::io::Error),

    /// The sink refused the payload.
    #[error("sink rejected payload: {0}")]
    Rejected(String),
}
