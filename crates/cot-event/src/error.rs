//! Error types for cot-event.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    /// The XML writer failed.
    #[error("xml: {0}")]
    Xml(String),

    /// The stale offset does not fit in the calendar.
    #[error("stale time out of range: now + {0}s")]
    StaleOutOfRange(i64),
}

impl EventError {
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}
