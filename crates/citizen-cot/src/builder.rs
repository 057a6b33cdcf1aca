//! Incident to CoT event.

use chrono::{DateTime, Utc};
use cot_event::{CotEvent, Detail, EventError, Point};
use cot_sink::EventPayload;

use crate::incident::Incident;

/// Unknown ground point.
pub const EVENT_TYPE: &str = "a-u-G";
/// Human-entered, GPS-derived position.
pub const EVENT_HOW: &str = "h-g-i-g-o";
/// Fixed height above ellipsoid for incident markers.
pub const POINT_HAE: &str = "250";
/// Elevation source reported in `<precisionlocation>`.
pub const ALTITUDE_SOURCE: &str = "DTED0";
/// Danger icon from the default iconset.
pub const ICONSET_PATH: &str = "6d781afb-89a6-4c07-b2b9-a89748b6a38f/Misc/danger.png";

/// Build the CoT event for `incident`, valid from `now` for `stale_seconds`.
///
/// Pure: identical inputs give a byte-identical payload.
pub fn build_event(
    incident: &Incident,
    stale_seconds: i64,
    now: DateTime<Utc>,
) -> Result<EventPayload, EventError> {
    let detail = Detail::new()
        .with_element("status", [("readiness", "true")])
        .with_element("precisionlocation", [("altsrc", ALTITUDE_SOURCE)])
        .with_text("remarks", incident.remarks())
        .with_element("contact", [("callsign", incident.name.as_str())])
        .with_element("color", [("argb", incident.alert_color.as_str())])
        .with_element("usericon", [("iconsetpath", ICONSET_PATH)]);

    let event = CotEvent::new(incident.id.as_str(), EVENT_TYPE, EVENT_HOW, now, stale_seconds)?
        .with_point(Point::new(incident.latitude, incident.longitude).with_hae(POINT_HAE))
        .with_detail(detail);

    Ok(EventPayload::new(incident.id.clone(), event.to_xml()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn incident() -> Incident {
        Incident {
            id: "0d8a5c".into(),
            name: "Brush Fire".into(),
            latitude: 34.1,
            longitude: -118.3,
            update_lines: vec![
                "9:05 AM - Units responding".into(),
                "9:40 AM - Forward progress stopped".into(),
            ],
            alert_color: "-35072".into(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_full_payload() {
        let payload = build_event(&incident(), 600, now()).unwrap();
        assert_eq!(payload.uid, "0d8a5c");
        assert_eq!(
            payload.xml,
            concat!(
                "<event version=\"2.0\" type=\"a-u-G\" uid=\"0d8a5c\" how=\"h-g-i-g-o\" ",
                "time=\"2024-03-01T17:00:00.000000Z\" start=\"2024-03-01T17:00:00.000000Z\" ",
                "stale=\"2024-03-01T17:10:00.000000Z\">",
                "<point lat=\"34.1\" lon=\"-118.3\" hae=\"250\" ce=\"9999999.0\" le=\"9999999.0\"/>",
                "<detail>",
                "<status readiness=\"true\"/>",
                "<precisionlocation altsrc=\"DTED0\"/>",
                "<remarks>9:05 AM - Units responding\n9:40 AM - Forward progress stopped</remarks>",
                "<contact callsign=\"Brush Fire\"/>",
                "<color argb=\"-35072\"/>",
                "<usericon iconsetpath=\"6d781afb-89a6-4c07-b2b9-a89748b6a38f/Misc/danger.png\"/>",
                "</detail>",
                "</event>",
            )
        );
    }

    #[test]
    fn test_deterministic() {
        let a = build_event(&incident(), 600, now()).unwrap();
        let b = build_event(&incident(), 600, now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_history_gives_empty_remarks() {
        let mut quiet = incident();
        quiet.update_lines.clear();
        let payload = build_event(&quiet, 60, now()).unwrap();
        assert!(payload.xml.contains("<remarks></remarks>"));
    }
}
