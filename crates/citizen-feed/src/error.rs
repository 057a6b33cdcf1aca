//! Error types for citizen-feed.

use thiserror::Error;

/// Errors that can occur while fetching the incident feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON but not shaped like a feed response.
    #[error("unexpected feed shape: {0}")]
    Shape(String),
}
