//! CoT event types.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::EventError;
use crate::writer;

/// Schema version written on every event.
pub const COT_VERSION: &str = "2.0";

/// CoT "unknown" value for height and error fields.
pub const UNKNOWN_MEASURE: &str = "9999999.0";

/// Render a timestamp the way CoT consumers expect: UTC, microseconds, `Z`.
pub fn cot_time(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Location of an event.
///
/// Height and error values are kept as text because downstream consumers
/// match them literally (`"250"` and `"9999999.0"` are distinct on the wire).
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    /// Height above ellipsoid, meters.
    pub hae: String,
    /// Circular error, meters.
    pub ce: String,
    /// Linear error, meters.
    pub le: String,
}

impl Point {
    /// A point with unknown height and error.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            hae: UNKNOWN_MEASURE.to_string(),
            ce: UNKNOWN_MEASURE.to_string(),
            le: UNKNOWN_MEASURE.to_string(),
        }
    }

    pub fn with_hae(mut self, hae: impl Into<String>) -> Self {
        self.hae = hae.into();
        self
    }
}

/// One child of `<detail>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Text content. `Some("")` still writes an open/close pair.
    pub text: Option<String>,
}

/// The `<detail>` block: ordered, free-form child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detail {
    pub elements: Vec<DetailElement>,
}

impl Detail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute-only element, e.g. `<status readiness="true"/>`.
    pub fn with_element<N, K, V, I>(mut self, name: N, attributes: I) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.elements.push(DetailElement {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            text: None,
        });
        self
    }

    /// Append a text element, e.g. `<remarks>...</remarks>`.
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements.push(DetailElement {
            name: name.into(),
            attributes: Vec::new(),
            text: Some(text.into()),
        });
        self
    }

    /// Look up the first element with this name.
    pub fn element(&self, name: &str) -> Option<&DetailElement> {
        self.elements.iter().find(|e| e.name == name)
    }
}

/// A CoT `<event>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CotEvent {
    pub uid: String,
    /// Event type, e.g. `a-u-G`.
    pub event_type: String,
    /// How the position was produced, e.g. `h-g-i-g-o`.
    pub how: String,
    pub time: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub stale: DateTime<Utc>,
    pub point: Point,
    pub detail: Detail,
}

impl CotEvent {
    /// Create an event generated and starting at `now`, going stale
    /// `stale_seconds` later. The point defaults to 0,0 with unknown error.
    pub fn new(
        uid: impl Into<String>,
        event_type: impl Into<String>,
        how: impl Into<String>,
        now: DateTime<Utc>,
        stale_seconds: i64,
    ) -> Result<Self, EventError> {
        let stale = Duration::try_seconds(stale_seconds)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or(EventError::StaleOutOfRange(stale_seconds))?;

        Ok(Self {
            uid: uid.into(),
            event_type: event_type.into(),
            how: how.into(),
            time: now,
            start: now,
            stale,
            point: Point::new(0.0, 0.0),
            detail: Detail::new(),
        })
    }

    pub fn with_point(mut self, point: Point) -> Self {
        self.point = point;
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Serialize to an XML string without a declaration.
    pub fn to_xml(&self) -> Result<String, EventError> {
        let bytes = writer::write_event(self)?;
        String::from_utf8(bytes).map_err(EventError::xml)
    }
}
