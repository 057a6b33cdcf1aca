//! Error types for the bridge core.

use thiserror::Error;

/// Errors raised while reading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key is not set.
    #[error("{0} not set")]
    Missing(&'static str),

    /// A key is set but its value does not parse.
    #[error("{key}: invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while rendering a feed timestamp.
#[derive(Debug, Error)]
pub enum ClockError {
    /// The timestamp is not finite or falls outside the calendar.
    #[error("timestamp out of range: {0}ms")]
    OutOfRange(f64),

    /// The formatting primitive could not render the pattern.
    #[error("could not render time with pattern {0:?}")]
    Render(&'static str),
}
