//! Normalize raw feed records into canonical incidents.

use chrono::NaiveDate;
use citizen_feed::{RawIncident, RawUpdate};
use tracing::{debug, warn};

use crate::classify::Classifier;
use crate::clock::LocalZone;
use crate::incident::Incident;

/// Turns [`RawIncident`]s into [`Incident`]s.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    zone: LocalZone,
    same_day_only: bool,
    classifier: Classifier,
}

impl Normalizer {
    pub fn new(zone: LocalZone, same_day_only: bool) -> Self {
        Self {
            zone,
            same_day_only,
            classifier: Classifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    /// Normalize one record.
    ///
    /// Returns `None` when the record is filtered out: not reported on
    /// `today` (if the same-day filter is on), or unusable.
    pub fn normalize(&self, raw: &RawIncident, today: NaiveDate) -> Option<Incident> {
        if raw.key.trim().is_empty() {
            warn!(title = %raw.title, "Skipping incident with empty key");
            return None;
        }

        if self.same_day_only {
            match self.zone.local_date(raw.ts) {
                Ok(reported) if reported == today => {}
                Ok(reported) => {
                    debug!(key = %raw.key, %reported, %today, "Skipping incident not reported today");
                    return None;
                }
                Err(e) => {
                    warn!(key = %raw.key, "Skipping incident with bad report time: {}", e);
                    return None;
                }
            }
        }

        let update_lines = self.update_lines(raw);
        let categories = raw.categories().unwrap_or_else(|e| {
            warn!(key = %raw.key, "Ignoring categories: {}", e);
            Vec::new()
        });
        let alert_color = self.classifier.classify(&categories).code;

        Some(Incident {
            id: raw.key.clone(),
            name: raw.title.clone(),
            latitude: raw.latitude,
            longitude: raw.longitude,
            update_lines,
            alert_color,
        })
    }

    /// Format the update history oldest first. Malformed or unrenderable
    /// updates are dropped one at a time.
    fn update_lines(&self, raw: &RawIncident) -> Vec<String> {
        let decoded = match raw.updates() {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key = %raw.key, "Ignoring updates: {}", e);
                return Vec::new();
            }
        };

        let mut updates: Vec<(&str, RawUpdate)> = decoded
            .into_iter()
            .filter_map(|(id, update)| match update {
                Ok(update) => Some((id, update)),
                Err(e) => {
                    warn!(key = %raw.key, update = id, "Skipping malformed update: {}", e);
                    None
                }
            })
            .collect();

        updates.sort_by(|a, b| a.1.ts.total_cmp(&b.1.ts));

        updates
            .into_iter()
            .filter_map(|(id, update)| match self.zone.format_clock_time(update.ts) {
                Ok(time) => Some(format!("{} - {}", time, update.text)),
                Err(e) => {
                    warn!(key = %raw.key, update = id, "Skipping update line: {}", e);
                    None
                }
            })
            .collect()
    }
}
