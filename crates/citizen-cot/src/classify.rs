//! Category label to CoT color.
//!
//! Two static tables: feed category label to color name, then color name to
//! the signed ARGB integer CoT puts in `<color argb="..."/>`. Only the first
//! category of an incident is consulted.

use tracing::warn;

/// Color used whenever a lookup misses.
pub const DEFAULT_COLOR: &str = "white";

/// Code for [`DEFAULT_COLOR`]. Always resolvable.
pub const DEFAULT_COLOR_CODE: &str = "-1";

/// Feed category label to color name. Matched case-insensitively.
pub const CATEGORY_COLORS: &[(&str, &str)] = &[
    // Fire
    ("Fire", "orange"),
    ("Structure Fire", "orange"),
    ("Brush Fire", "orange"),
    ("Vehicle Fire", "orange"),
    ("Smoke", "orange"),
    ("Explosion", "orange"),
    // Violence
    ("Shooting", "red"),
    ("Gunfire", "red"),
    ("Stabbing", "red"),
    ("Assault", "red"),
    ("Weapon", "red"),
    ("Robbery", "red"),
    ("Homicide", "red"),
    // Police
    ("Police", "blue"),
    ("Police Activity", "blue"),
    ("Crime", "blue"),
    ("Burglary", "blue"),
    ("Theft", "blue"),
    ("Vandalism", "blue"),
    ("Missing Person", "blue"),
    // Medical
    ("Medical", "magenta"),
    ("Rescue", "magenta"),
    // Traffic
    ("Traffic", "yellow"),
    ("Collision", "yellow"),
    ("Vehicle Crash", "yellow"),
    ("Road Closure", "yellow"),
    // Hazards
    ("Hazard", "brown"),
    ("Gas Leak", "brown"),
    ("Hazmat", "brown"),
    ("Power Outage", "brown"),
    // Weather
    ("Weather", "cyan"),
    ("Flood", "cyan"),
    ("Earthquake", "cyan"),
    // Gatherings
    ("Protest", "green"),
    ("Demonstration", "green"),
];

/// Color name to signed 32-bit ARGB, as decimal text.
pub const COLOR_CODES: &[(&str, &str)] = &[
    ("white", "-1"),
    ("yellow", "-256"),
    ("orange", "-35072"),
    ("magenta", "-65281"),
    ("red", "-65536"),
    ("brown", "-7650029"),
    ("blue", "-16776961"),
    ("green", "-16711936"),
    ("cyan", "-16711681"),
    ("black", "-16777216"),
];

/// Why a classification fell back to the default color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// The incident has no categories.
    NoCategory,
    /// The first category is not in the category table.
    UnknownCategory(String),
    /// The category maps to a color name with no code.
    UnknownColor(String),
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// ARGB code, never empty.
    pub code: String,
    /// Set when the default was used.
    pub fallback: Option<Fallback>,
}

/// The two-stage lookup over a pair of tables.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    categories: &'static [(&'static str, &'static str)],
    codes: &'static [(&'static str, &'static str)],
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CATEGORY_COLORS, COLOR_CODES)
    }
}

impl Classifier {
    pub fn new(
        categories: &'static [(&'static str, &'static str)],
        codes: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { categories, codes }
    }

    /// Resolve the color for a category list. Logs a warning on fallback.
    pub fn classify(&self, categories: &[String]) -> Classification {
        let result = self.resolve(categories);
        if let Some(reason) = &result.fallback {
            warn!(?reason, "Using default color {}", DEFAULT_COLOR);
        }
        result
    }

    fn resolve(&self, categories: &[String]) -> Classification {
        let Some(first) = categories.first() else {
            return self.fallback(Fallback::NoCategory);
        };

        let label = first.trim();
        let Some(color) = lookup(self.categories, label) else {
            return self.fallback(Fallback::UnknownCategory(label.to_string()));
        };

        match lookup(self.codes, color) {
            Some(code) => Classification {
                code: code.to_string(),
                fallback: None,
            },
            None => self.fallback(Fallback::UnknownColor(color.to_string())),
        }
    }

    fn fallback(&self, reason: Fallback) -> Classification {
        let code = lookup(self.codes, DEFAULT_COLOR).unwrap_or(DEFAULT_COLOR_CODE);
        Classification {
            code: code.to_string(),
            fallback: Some(reason),
        }
    }
}

/// Classify with the built-in tables and return only the code.
pub fn classify(categories: &[String]) -> String {
    Classifier::default().classify(categories).code
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}
