//! XML serialization for [`CotEvent`].

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::EventError;
use crate::event::{cot_time, CotEvent, COT_VERSION};

/// Write `event` as an XML element tree. Attribute order is fixed.
pub(crate) fn write_event(event: &CotEvent) -> Result<Vec<u8>, EventError> {
    let mut writer = Writer::new(Vec::new());

    let time = cot_time(&event.time);
    let start = cot_time(&event.start);
    let stale = cot_time(&event.stale);
    let root = BytesStart::new("event").with_attributes([
        ("version", COT_VERSION),
        ("type", event.event_type.as_str()),
        ("uid", event.uid.as_str()),
        ("how", event.how.as_str()),
        ("time", time.as_str()),
        ("start", start.as_str()),
        ("stale", stale.as_str()),
    ]);
    writer
        .write_event(Event::Start(root))
        .map_err(EventError::xml)?;

    let lat = format_coord(event.point.lat);
    let lon = format_coord(event.point.lon);
    let point = BytesStart::new("point").with_attributes([
        ("lat", lat.as_str()),
        ("lon", lon.as_str()),
        ("hae", event.point.hae.as_str()),
        ("ce", event.point.ce.as_str()),
        ("le", event.point.le.as_str()),
    ]);
    writer
        .write_event(Event::Empty(point))
        .map_err(EventError::xml)?;

    writer
        .write_event(Event::Start(BytesStart::new("detail")))
        .map_err(EventError::xml)?;

    for element in &event.detail.elements {
        let tag = BytesStart::new(element.name.as_str()).with_attributes(
            element
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        let Some(text) = &element.text else {
            writer
                .write_event(Event::Empty(tag))
                .map_err(EventError::xml)?;
            continue;
        };

        writer
            .write_event(Event::Start(tag))
            .map_err(EventError::xml)?;
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(EventError::xml)?;
        writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))
            .map_err(EventError::xml)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("detail")))
        .map_err(EventError::xml)?;
    writer
        .write_event(Event::End(BytesEnd::new("event")))
        .map_err(EventError::xml)?;

    Ok(writer.into_inner())
}

/// Shortest round-trip decimal, always with a fractional part (`34.0`, not `34`).
fn format_coord(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Detail, Point};
    use chrono::{TimeZone, Utc};

    fn sample() -> CotEvent {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        CotEvent::new("inc-1", "a-u-G", "h-g-i-g-o", now, 60)
            .unwrap()
            .with_point(Point::new(34.0, -118.25).with_hae("250"))
            .with_detail(
                Detail::new()
                    .with_element("status", [("readiness", "true")])
                    .with_text("remarks", "line one\nline <two> & more")
                    .with_element("contact", [("callsign", "Fire \"Big\"")]),
            )
    }

    #[test]
    fn test_root_attributes_in_order() {
        let xml = sample().to_xml().unwrap();
        assert!(xml.starts_with(
            "<event version=\"2.0\" type=\"a-u-G\" uid=\"inc-1\" how=\"h-g-i-g-o\" \
             time=\"2024-01-15T10:30:00.000000Z\" start=\"2024-01-15T10:30:00.000000Z\" \
             stale=\"2024-01-15T10:31:00.000000Z\">"
        ));
        assert!(xml.ends_with("</detail></event>"));
    }

    #[test]
    fn test_point_formatting() {
        let xml = sample().to_xml().unwrap();
        assert!(xml.contains(
            "<point lat=\"34.0\" lon=\"-118.25\" hae=\"250\" ce=\"9999999.0\" le=\"9999999.0\"/>"
        ));
    }

    #[test]
    fn test_text_and_attributes_escaped() {
        let xml = sample().to_xml().unwrap();
        assert!(xml.contains("<remarks>line one\nline &lt;two&gt; &amp; more</remarks>"));
        assert!(xml.contains("callsign=\"Fire &quot;Big&quot;\""));
    }

    #[test]
    fn test_empty_text_keeps_element() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let event = CotEvent::new("u", "a-u-G", "h-g-i-g-o", now, 0)
            .unwrap()
            .with_detail(Detail::new().with_text("remarks", ""));
        let xml = event.to_xml().unwrap();
        assert!(xml.contains("<detail><remarks></remarks></detail>"));
    }
}
