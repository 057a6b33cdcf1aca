//! Wall clock and local-time rendering.
//!
//! Feed timestamps are milliseconds since the epoch. They are shown to
//! operators as a 12-hour wall-clock time (`"3:07 PM"`) in the bridge's local
//! zone, and the same zone decides what "today" means for the date filter.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::error::{ClockError, ConfigError};

/// 12-hour clock, no leading zero on the hour.
const CLOCK_PATTERN: &str = "%-I:%M %p";

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The host's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The zone used for "today" and for rendering update times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// Whatever the host is configured for, DST included.
    #[default]
    Host,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl LocalZone {
    /// Parse `host`/`local`, `UTC`/`Z`, or an offset such as `-07:00`.
    pub fn parse(key: &'static str, value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "host" | "local" => return Ok(Self::Host),
            "utc" | "z" => return Ok(Self::utc()),
            _ => {}
        }
        trimmed
            .parse::<FixedOffset>()
            .map(Self::Fixed)
            .map_err(|e| ConfigError::invalid(key, value, e.to_string()))
    }

    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Shift a UTC instant into this zone.
    pub fn localize(&self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Host => {
                let local = ts.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Self::Fixed(offset) => ts.with_timezone(offset),
        }
    }

    /// The local calendar date of `now`.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.localize(now).date_naive()
    }

    /// The local calendar date of a feed timestamp.
    pub fn local_date(&self, millis: f64) -> Result<NaiveDate, ClockError> {
        Ok(self.localize(from_millis(millis)?).date_naive())
    }

    /// Render a feed timestamp as `"H:MM AM"` / `"H:MM PM"`.
    pub fn format_clock_time(&self, millis: f64) -> Result<String, ClockError> {
        let local = self.localize(from_millis(millis)?);
        let mut out = String::new();
        write!(out, "{}", local.format(CLOCK_PATTERN))
            .map_err(|_| ClockError::Render(CLOCK_PATTERN))?;
        Ok(out)
    }
}

fn from_millis(millis: f64) -> Result<DateTime<Utc>, ClockError> {
    if !millis.is_finite() || millis < 0.0 || millis > i64::MAX as f64 {
        return Err(ClockError::OutOfRange(millis));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(ClockError::OutOfRange(millis))
}
