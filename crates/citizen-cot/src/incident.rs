//! The canonical incident.

/// One normalized incident, ready to become a CoT event.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    /// Feed key. Stable across polls.
    pub id: String,
    /// Feed title, shown as the callsign.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `"<time> - <text>"`, oldest first.
    pub update_lines: Vec<String>,
    /// Signed ARGB code, never empty.
    pub alert_color: String,
}

impl Incident {
    /// Update history as one newline-separated block.
    pub fn remarks(&self) -> String {
        self.update_lines.join("\n")
    }
}
