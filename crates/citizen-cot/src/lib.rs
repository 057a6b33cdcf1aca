//! Citizen incident feed to Cursor-on-Target bridge.
//!
//! Each poll cycle fetches the feed, keeps the incidents reported today,
//! turns each into a CoT event and hands it to an [`EventSink`], pacing
//! submissions, then sleeps until the next cycle.
//!
//! - [`clock`] - Wall clock and 12-hour local time rendering
//! - [`classify`] - Category label to ARGB color code
//! - [`normalize`] - Raw feed record to [`Incident`]
//! - [`builder`] - [`Incident`] to serialized CoT event
//! - [`poller`] - The fetch / sleep loop
//! - [`config`] - Live key/value settings
//!
//! [`EventSink`]: cot_sink::EventSink

pub mod builder;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod incident;
pub mod normalize;
pub mod poller;

pub use builder::build_event;
pub use classify::{classify, Classification, Classifier, Fallback};
pub use clock::{Clock, FixedClock, LocalZone, SystemClock};
pub use config::{ConfigSource, EnvSource, MapSource, PollSettings};
pub use error::{ClockError, ConfigError};
pub use incident::Incident;
pub use normalize::Normalizer;
pub use poller::{CycleReport, Poller, Sleeper, TokioSleeper};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
