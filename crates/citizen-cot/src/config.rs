//! Live key/value configuration.
//!
//! Settings are read through a [`ConfigSource`] at the top of every poll
//! cycle rather than once at startup, so a source that changes underneath
//! (the process environment, say) takes effect on the next cycle.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::clock::LocalZone;
use crate::error::ConfigError;

/// Feed URL. Required.
pub const KEY_FEED_URL: &str = "CITIZEN_API_URL";
/// Seconds between polls. Required.
pub const KEY_POLL_INTERVAL: &str = "POLL_INTERVAL";
/// Seconds until an event goes stale. Defaults to the poll interval.
pub const KEY_STALE_INTERVAL: &str = "STALE_INTERVAL";
/// Keep only incidents reported on the local "today". Defaults to true.
pub const KEY_SAME_DAY_ONLY: &str = "SAME_DAY_ONLY";
/// Milliseconds between two submitted events. Defaults to 100.
pub const KEY_EVENT_PACING_MS: &str = "EVENT_PACING_MS";
/// Request timeout for a feed fetch, seconds, at least 1. Defaults to 30.
/// Applied per request, so a change takes effect on the next fetch.
pub const KEY_FEED_TIMEOUT_SECS: &str = "FEED_TIMEOUT_SECS";
/// Zone for "today" and update times (`host`, `UTC`, `-07:00`). Defaults to host.
pub const KEY_LOCAL_TZ: &str = "LOCAL_TZ_OFFSET";

/// Default gap between submitted events.
pub const DEFAULT_EVENT_PACING: Duration = Duration::from_millis(100);

/// Default feed request timeout.
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// A key/value settings store.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment on every lookup.
///
/// Keys may be namespaced with a prefix, e.g. `CITIZENTOCOT_POLL_INTERVAL`;
/// the prefixed key wins over the bare one.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.prefix
            .as_ref()
            .and_then(|prefix| env::var(format!("{}{}", prefix, key)).ok())
            .or_else(|| env::var(key).ok())
    }
}

/// A fixed map of settings.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Settings for one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub feed_url: String,
    pub poll_interval: Duration,
    pub stale_seconds: i64,
    pub same_day_only: bool,
    pub event_pacing: Duration,
    pub feed_timeout: Duration,
    pub zone: LocalZone,
}

impl PollSettings {
    /// Read and validate settings from `source`.
    ///
    /// Required keys:
    /// - `CITIZEN_API_URL`
    /// - `POLL_INTERVAL` (whole seconds, at least 1)
    ///
    /// Optional keys:
    /// - `STALE_INTERVAL` (default: `POLL_INTERVAL`)
    /// - `SAME_DAY_ONLY` (default: true)
    /// - `EVENT_PACING_MS` (default: 100)
    /// - `FEED_TIMEOUT_SECS` (at least 1, default: 30)
    /// - `LOCAL_TZ_OFFSET` (default: host zone)
    pub fn load(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let feed_url = source
            .get(KEY_FEED_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(KEY_FEED_URL))?;
        if !(feed_url.starts_with("http://") || feed_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                KEY_FEED_URL,
                &feed_url,
                "expected an http(s) URL",
            ));
        }

        let poll_secs = source
            .get(KEY_POLL_INTERVAL)
            .ok_or(ConfigError::Missing(KEY_POLL_INTERVAL))
            .and_then(|v| parse_u64(KEY_POLL_INTERVAL, &v))?;
        if poll_secs == 0 {
            return Err(ConfigError::invalid(
                KEY_POLL_INTERVAL,
                "0",
                "must be at least 1 second",
            ));
        }

        let stale_seconds = match source.get(KEY_STALE_INTERVAL) {
            Some(v) => parse_u64(KEY_STALE_INTERVAL, &v)?,
            None => poll_secs,
        };
        let stale_seconds = i64::try_from(stale_seconds).map_err(|_| {
            ConfigError::invalid(KEY_STALE_INTERVAL, &stale_seconds.to_string(), "too large")
        })?;

        let same_day_only = match source.get(KEY_SAME_DAY_ONLY) {
            Some(v) => parse_bool(KEY_SAME_DAY_ONLY, &v)?,
            None => true,
        };

        let event_pacing = match source.get(KEY_EVENT_PACING_MS) {
            Some(v) => Duration::from_millis(parse_u64(KEY_EVENT_PACING_MS, &v)?),
            None => DEFAULT_EVENT_PACING,
        };

        let feed_timeout = match source.get(KEY_FEED_TIMEOUT_SECS) {
            Some(v) => match parse_u64(KEY_FEED_TIMEOUT_SECS, &v)? {
                0 => {
                    return Err(ConfigError::invalid(
                        KEY_FEED_TIMEOUT_SECS,
                        &v,
                        "must be at least 1 second",
                    ))
                }
                secs => Duration::from_secs(secs),
            },
            None => DEFAULT_FEED_TIMEOUT,
        };

        let zone = match source.get(KEY_LOCAL_TZ) {
            Some(v) => LocalZone::parse(KEY_LOCAL_TZ, &v)?,
            None => LocalZone::Host,
        };

        Ok(Self {
            feed_url,
            poll_interval: Duration::from_secs(poll_secs),
            stale_seconds,
            same_day_only,
            event_pacing,
            feed_timeout,
            zone,
        })
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::invalid(key, value, e.to_string()))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> MapSource {
        MapSource::new()
            .with(KEY_FEED_URL, "https://citizen.com/api/incident/trending")
            .with(KEY_POLL_INTERVAL, "600")
    }

    #[test]
    fn test_defaults() {
        let settings = PollSettings::load(&minimal()).unwrap();
        assert_eq!(settings.poll_interval, Duration::from_secs(600));
        assert_eq!(settings.stale_seconds, 600);
        assert!(settings.same_day_only);
        assert_eq!(settings.event_pacing, Duration::from_millis(100));
        assert_eq!(settings.feed_timeout, Duration::from_secs(30));
        assert_eq!(settings.zone, LocalZone::Host);
    }

    #[test]
    fn test_overrides() {
        let source = minimal()
            .with(KEY_STALE_INTERVAL, "900")
            .with(KEY_SAME_DAY_ONLY, "false")
            .with(KEY_EVENT_PACING_MS, "0")
            .with(KEY_FEED_TIMEOUT_SECS, "5")
            .with(KEY_LOCAL_TZ, "UTC");
        let settings = PollSettings::load(&source).unwrap();
        assert_eq!(settings.stale_seconds, 900);
        assert!(!settings.same_day_only);
        assert_eq!(settings.event_pacing, Duration::ZERO);
        assert_eq!(settings.feed_timeout, Duration::from_secs(5));
        assert_eq!(settings.zone, LocalZone::utc());
    }

    #[test]
    fn test_poll_interval_accepts_padded_string() {
        let source = minimal().with(KEY_POLL_INTERVAL, " 60 ");
        let settings = PollSettings::load(&source).unwrap();
        assert_eq!(settings.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_url() {
        let source = MapSource::new().with(KEY_POLL_INTERVAL, "60");
        let err = PollSettings::load(&source).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(KEY_FEED_URL)));
    }

    #[test]
    fn test_rejects_bad_values() {
        for (key, value) in [
            (KEY_POLL_INTERVAL, "ten"),
            (KEY_POLL_INTERVAL, "0"),
            (KEY_POLL_INTERVAL, "-5"),
            (KEY_FEED_TIMEOUT_SECS, "0"),
            (KEY_SAME_DAY_ONLY, "maybe"),
            (KEY_FEED_URL, "ftp://example.com/feed"),
            (KEY_LOCAL_TZ, "moon"),
        ] {
            let source = minimal().with(key, value);
            let err = PollSettings::load(&source).unwrap_err();
            assert!(err.to_string().contains(key), "{} => {}", value, err);
        }
    }

    #[test]
    fn test_env_source_prefix_wins() {
        env::set_var("CITIZEN_COT_TEST_ONLY_KEY", "bare");
        env::set_var("PFX_CITIZEN_COT_TEST_ONLY_KEY", "prefixed");

        let bare = EnvSource::new();
        let prefixed = EnvSource::with_prefix("PFX_");
        assert_eq!(bare.get("CITIZEN_COT_TEST_ONLY_KEY").as_deref(), Some("bare"));
        assert_eq!(
            prefixed.get("CITIZEN_COT_TEST_ONLY_KEY").as_deref(),
            Some("prefixed")
        );
        assert!(prefixed.get("CITIZEN_COT_TEST_ONLY_UNSET").is_none());
    }

    #[test]
    fn test_map_source_from_iter() {
        let source: MapSource = [(KEY_FEED_URL, "http://localhost/feed"), (KEY_POLL_INTERVAL, "1")]
            .into_iter()
            .collect();
        assert_eq!(source.get(KEY_POLL_INTERVAL).as_deref(), Some("1"));
        assert!(source.get(KEY_STALE_INTERVAL).is_none());
    }
}
