//! Configuration types for citizen-feed.

use std::time::Duration;

/// Default request timeout for a single feed fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the feed HTTP client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Timeout applied to every request, connect included.
    pub timeout: Duration,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl FeedConfig {
    /// Create a configuration with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("citizen-cot/{}", crate::version()),
        }
    }
}
