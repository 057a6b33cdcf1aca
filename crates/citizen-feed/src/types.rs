//! Wire types for the incident feed.
//!
//! The feed makes no guarantees about its records, so the response keeps each
//! entry as raw JSON and decodes lazily. Unknown fields are ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FeedError;

/// A decoded feed response: the `results` array, still undecoded per entry.
#[derive(Debug, Clone, Default)]
pub struct FeedResponse {
    pub results: Vec<Value>,
}

impl FeedResponse {
    /// Parse a response body.
    ///
    /// Fails only when the body is not JSON or has no `results` array.
    pub fn from_slice(body: &[u8]) -> Result<Self, FeedError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Build a response from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, FeedError> {
        match value {
            Value::Object(mut obj) => match obj.remove("results") {
                Some(Value::Array(results)) => Ok(Self { results }),
                Some(other) => Err(FeedError::Shape(format!(
                    "`results` is {}, expected an array",
                    json_kind(&other)
                ))),
                None => Err(FeedError::Shape("missing `results`".to_string())),
            },
            other => Err(FeedError::Shape(format!(
                "top level is {}, expected an object",
                json_kind(&other)
            ))),
        }
    }

    /// Number of entries, malformed ones included.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Decode each entry into a [`RawIncident`], in feed order.
    pub fn incidents(&self) -> impl Iterator<Item = Result<RawIncident, serde_json::Error>> + '_ {
        self.results
            .iter()
            .map(|entry| RawIncident::deserialize(entry))
    }
}

/// One incident record as the feed reports it.
///
/// `categories` and `updates` stay raw: a wrong type in either costs only
/// that field, never the record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIncident {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub key: String,
    /// Report time in milliseconds since the Unix epoch.
    pub ts: f64,
    /// Expected: an array of category labels.
    #[serde(default)]
    pub categories: Option<Value>,
    /// Expected: an object of update id to update body.
    #[serde(default)]
    pub updates: Option<Value>,
}

impl RawIncident {
    /// Category labels; an absent or null field reads as empty.
    ///
    /// Fails when the field is not an array or its first entry is not a
    /// string. Later non-string entries are dropped.
    pub fn categories(&self) -> Result<Vec<String>, FeedError> {
        let items = match &self.categories {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FeedError::Shape(format!(
                    "`categories` is {}, expected an array",
                    json_kind(other)
                )))
            }
        };

        match items.first() {
            None | Some(Value::String(_)) => Ok(items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()),
            Some(other) => Err(FeedError::Shape(format!(
                "first category is {}, expected a string",
                json_kind(other)
            ))),
        }
    }

    /// Decode each update entry. Order follows the feed's map order, which
    /// is not chronological.
    ///
    /// Fails when the field is present but not an object.
    pub fn updates(&self) -> Result<Vec<DecodedUpdate<'_>>, FeedError> {
        let map: &Map<String, Value> = match &self.updates {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(FeedError::Shape(format!(
                    "`updates` is {}, expected an object",
                    json_kind(other)
                )))
            }
        };

        Ok(map
            .iter()
            .map(|(id, body)| (id.as_str(), RawUpdate::deserialize(body)))
            .collect())
    }
}

/// An update id paired with its decoded body.
pub type DecodedUpdate<'a> = (&'a str, Result<RawUpdate, serde_json::Error>);

/// One entry of an incident's update history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawUpdate {
    /// Update time in milliseconds since the Unix epoch.
    pub ts: f64,
    pub text: String,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_results_is_shape_error() {
        let err = FeedResponse::from_slice(br#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::Shape(_)));
        assert!(err.to_string().contains("results"));
    }

    #[test]
    fn test_non_json_body_is_json_error() {
        let err = FeedResponse::from_slice(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[test]
    fn test_results_must_be_array() {
        let err = FeedResponse::from_value(json!({"results": {"a": 1}})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_malformed_entry_does_not_poison_batch() {
        let response = FeedResponse::from_value(json!({
            "results": [
                {"title": "Structure Fire", "latitude": 34.05, "longitude": -118.25,
                 "key": "abc", "ts": 1700000000000u64},
                {"title": "No coordinates", "key": "def", "ts": 1700000000000u64},
            ]
        }))
        .unwrap();

        let decoded: Vec<_> = response.incidents().collect();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].as_ref().unwrap().key, "abc");
        assert!(decoded[1].is_err());
    }

    #[test]
    fn test_absent_categories_and_updates_read_as_empty() {
        let raw: RawIncident = serde_json::from_value(json!({
            "title": "Police Activity", "latitude": 40.7, "longitude": -74.0,
            "key": "k1", "ts": 1.0, "unknown": true
        }))
        .unwrap();
        assert!(raw.categories().unwrap().is_empty());
        assert!(raw.updates().unwrap().is_empty());
    }

    #[test]
    fn test_bad_update_is_isolated() {
        let raw: RawIncident = serde_json::from_value(json!({
            "title": "Gas Leak", "latitude": 1.0, "longitude": 2.0, "key": "k2", "ts": 5.0,
            "updates": {
                "u1": {"ts": 1000, "text": "Crews on scene"},
                "u2": {"ts": "soon", "text": "Bad timestamp"}
            }
        }))
        .unwrap();

        let updates = raw.updates().unwrap();
        assert_eq!(updates.len(), 2);
        let ok: Vec<_> = updates.iter().filter(|(_, u)| u.is_ok()).collect();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].0, "u1");
    }

    #[test]
    fn test_mistyped_optional_fields_do_not_fail_record() {
        let raw: RawIncident = serde_json::from_value(json!({
            "title": "Odd", "latitude": 1.0, "longitude": 2.0, "key": "k3", "ts": 5.0,
            "categories": "Fire",
            "updates": [{"ts": 1000, "text": "listed, not keyed"}]
        }))
        .unwrap();

        assert!(matches!(raw.categories(), Err(FeedError::Shape(_))));
        assert!(matches!(raw.updates(), Err(FeedError::Shape(_))));
    }

    #[test]
    fn test_first_category_must_be_string() {
        let raw: RawIncident = serde_json::from_value(json!({
            "title": "Odd", "latitude": 1.0, "longitude": 2.0, "key": "k4", "ts": 5.0,
            "categories": [42, "Fire"]
        }))
        .unwrap();
        let err = raw.categories().unwrap_err();
        assert!(err.to_string().contains("a number"));

        let mixed: RawIncident = serde_json::from_value(json!({
            "title": "Odd", "latitude": 1.0, "longitude": 2.0, "key": "k5", "ts": 5.0,
            "categories": ["Fire", null, 7]
        }))
        .unwrap();
        assert_eq!(mixed.categories().unwrap(), vec!["Fire".to_string()]);
    }
}
