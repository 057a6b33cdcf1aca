//! Cursor-on-Target (CoT) event model.
//!
//! CoT events are small XML documents describing a point of interest, its
//! validity window, and free-form detail elements. This crate models the
//! subset the incident bridge emits and serializes it with quick-xml.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cot_event::{CotEvent, Point};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let event = CotEvent::new("incident-1", "a-u-G", "h-g-i-g-o", now, 300)
//!     .unwrap()
//!     .with_point(Point::new(37.7749, -122.4194));
//!
//! let xml = event.to_xml().unwrap();
//! assert!(xml.starts_with(r#"<event version="2.0" type="a-u-G""#));
//! ```

pub mod error;
pub mod event;
mod writer;

pub use error::EventError;
pub use event::{cot_time, CotEvent, Detail, DetailElement, Point, COT_VERSION, UNKNOWN_MEASURE};
