//! The poll loop: fetch, normalize, build, submit, sleep.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use citizen_feed::FeedSource;
use cot_sink::EventSink;
use tracing::{debug, error, info, warn};

use crate::builder::build_event;
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigSource, PollSettings};
use crate::normalize::Normalizer;

/// Something that can suspend the loop.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Entries in the feed response.
    pub fetched: usize,
    /// Entries that did not decode.
    pub malformed: usize,
    /// Entries dropped by the normalizer.
    pub filtered: usize,
    /// Events accepted by the sink.
    pub submitted: usize,
    /// Events built but lost (build or sink failure).
    pub dropped: usize,
    /// The fetch itself failed; nothing else ran.
    pub fetch_failed: bool,
}

/// Polls the feed forever, one cycle at a time.
pub struct Poller {
    feed: Arc<dyn FeedSource>,
    sink: Arc<dyn EventSink>,
    config: Arc<dyn ConfigSource>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    settings: PollSettings,
}

impl Poller {
    /// Create a poller. `settings` must already be valid; they are used
    /// whenever a later reload of `config` fails.
    pub fn new(
        feed: Arc<dyn FeedSource>,
        sink: Arc<dyn EventSink>,
        config: Arc<dyn ConfigSource>,
        settings: PollSettings,
    ) -> Self {
        Self {
            feed,
            sink,
            config,
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(TokioSleeper),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// The settings the next cycle starts from.
    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Run forever: [`Poller::step`] in a loop.
    pub async fn run(&mut self) {
        info!(
            "Polling {} every {}s (sink: {})",
            self.settings.feed_url,
            self.settings.poll_interval.as_secs(),
            self.sink.name()
        );
        loop {
            self.step().await;
        }
    }

    /// One full cycle: fetch and submit, then sleep for the poll interval.
    pub async fn step(&mut self) -> CycleReport {
        let report = self.poll_once().await;

        let interval = self.settings.poll_interval;
        info!(
            submitted = report.submitted,
            filtered = report.filtered,
            malformed = report.malformed,
            dropped = report.dropped,
            "Added {} activity reports! Checking in {} minutes...",
            report.submitted,
            interval.as_secs() / 60
        );

        self.sleeper.sleep(interval).await;
        report
    }

    /// Fetch once and submit every resulting event, pacing between them.
    /// Does not sleep for the poll interval.
    pub async fn poll_once(&mut self) -> CycleReport {
        self.reload_settings();
        let settings = self.settings.clone();
        let mut report = CycleReport::default();

        let response = match self
            .feed
            .fetch_with_timeout(&settings.feed_url, settings.feed_timeout)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(url = %settings.feed_url, "Feed fetch failed, retrying next cycle: {}", e);
                report.fetch_failed = true;
                return report;
            }
        };
        report.fetched = response.len();

        let normalizer = Normalizer::new(settings.zone, settings.same_day_only);
        let today = normalizer.zone().today(self.clock.now());

        for (index, record) in response.incidents().enumerate() {
            let raw = match record {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index, "Skipping malformed feed record: {}", e);
                    report.malformed += 1;
                    continue;
                }
            };

            let Some(incident) = normalizer.normalize(&raw, today) else {
                report.filtered += 1;
                continue;
            };

            match build_event(&incident, settings.stale_seconds, self.clock.now()) {
                Ok(payload) => {
                    debug!(uid = %payload.uid, callsign = %incident.name, "Submitting event");
                    match self.sink.submit(payload).await {
                        Ok(()) => report.submitted += 1,
                        Err(e) => {
                            warn!(uid = %incident.id, "Sink refused event: {}", e);
                            report.dropped += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(uid = %incident.id, "Could not build event: {}", e);
                    report.dropped += 1;
                    continue;
                }
            }

            self.sleeper.sleep(settings.event_pacing).await;
        }

        report
    }

    fn reload_settings(&mut self) {
        match PollSettings::load(self.config.as_ref()) {
            Ok(settings) => {
                if settings != self.settings {
                    info!(
                        url = %settings.feed_url,
                        poll_interval = settings.poll_interval.as_secs(),
                        feed_timeout = settings.feed_timeout.as_secs(),
                        "Configuration changed"
                    );
                    self.settings = settings;
                }
            }
            Err(e) => {
                error!("Invalid configuration, keeping previous settings: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("settings", &self.settings)
            .field("sink", &self.sink.name())
            .finish()
    }
}
