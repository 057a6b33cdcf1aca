//! Incident feed HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::types::FeedResponse;

/// Anything that can produce one feed response for a URL.
///
/// The poller only sees this trait, so tests can serve canned responses
/// without a network.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse one response from `url`.
    async fn fetch(&self, url: &str) -> Result<FeedResponse, FeedError>;

    /// Fetch with a request timeout that overrides any configured default.
    ///
    /// Sources without a notion of timeout ignore it.
    async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<FeedResponse, FeedError> {
        let _ = timeout;
        self.fetch(url).await
    }
}

/// Client for the Citizen incident feed.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Build a client. No request is made until [`FeedSource::fetch`].
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FeedError::Http)?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> Result<FeedResponse, FeedError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FeedError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(FeedError::Http)?;
        let parsed = FeedResponse::from_slice(&body)?;
        debug!(results = parsed.len(), "Feed fetched");
        Ok(parsed)
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, url: &str) -> Result<FeedResponse, FeedError> {
        debug!("Fetching feed: {}", url);
        self.send(self.http.get(url)).await
    }

    async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<FeedResponse, FeedError> {
        debug!(timeout_secs = timeout.as_secs(), "Fetching feed: {}", url);
        self.send(self.http.get(url).timeout(timeout)).await
    }
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("config", &self.config)
            .finish()
    }
}
