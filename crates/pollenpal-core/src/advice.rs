//! Rule-based health advice derived from the active day's pollen levels.
//!
//! Classification only recognizes `low`, `moderate`, `high` and `very high`
//! (case-insensitive). Any other level string, including an empty one, is left
//! out of both tiers and does not influence the headline.

use serde::Serialize;

use crate::types::{Category, PollenRecord};

pub const NO_DATA_ADVICE: &str = "Unable to provide advice - no data available";

const HIGH_TIPS: [&str; 4] = [
    "Stay indoors during peak hours (5-10 AM and dusk)",
    "Keep windows closed",
    "Consider antihistamines",
    "Wear wraparound sunglasses outdoors",
];

const MODERATE_TIPS: [&str; 2] = [
    "Monitor symptoms closely",
    "Consider limiting outdoor activities",
];

const LOW_LINES: [&str; 2] = [
    "GOOD NEWS: All pollen levels are currently low",
    "Generally safe for outdoor activities",
];

/// Appended after every tier's lines. The first entry doubles as the marker
/// renderers use to start the general-tips section.
pub const GENERAL_TIPS: [&str; 4] = [
    "Check forecast daily",
    "Shower after being outdoors",
    "Dry clothes indoors",
    "Use HEPA air filters",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Unknown,
    Low,
    Moderate,
    High,
}

impl AlertLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Unknown => "unknown",
            AlertLevel::Low => "low",
            AlertLevel::Moderate => "moderate",
            AlertLevel::High => "high",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceReport {
    pub advice: Vec<String>,
    pub alert_level: AlertLevel,
    pub high_levels: Vec<Category>,
    pub moderate_levels: Vec<Category>,
}

impl AdviceReport {
    fn unknown() -> Self {
        Self {
            advice: vec![NO_DATA_ADVICE.to_string()],
            alert_level: AlertLevel::Unknown,
            high_levels: Vec::new(),
            moderate_levels: Vec::new(),
        }
    }
}

/// Builds the advice report for a record's active day.
///
/// Returns the `unknown` report when there is no record or no active day.
/// High categories take precedence over moderate ones for the headline, but
/// both lists are always populated.
#[must_use]
pub fn advise(record: Option<&PollenRecord>) -> AdviceReport {
    let Some(current) = record.and_then(|r| r.current_day.as_ref()) else {
        return AdviceReport::unknown();
    };

    let mut high_levels = Vec::new();
    let mut moderate_levels = Vec::new();

    for category in Category::ALL {
        match current.category(category).level.to_lowercase().as_str() {
            "high" | "very high" => high_levels.push(category),
            "moderate" => moderate_levels.push(category),
            _ => {}
        }
    }

    let mut advice = Vec::with_capacity(1 + HIGH_TIPS.len() + GENERAL_TIPS.len());
    let alert_level = if !high_levels.is_empty() {
        advice.push(format!(
            "HIGH ALERT: {} pollen levels are high",
            joined_title(&high_levels)
        ));
        advice.extend(HIGH_TIPS.iter().map(ToString::to_string));
        AlertLevel::High
    } else if !moderate_levels.is_empty() {
        advice.push(format!(
            "MODERATE: {} pollen levels are moderate",
            joined_title(&moderate_levels)
        ));
        advice.extend(MODERATE_TIPS.iter().map(ToString::to_string));
        AlertLevel::Moderate
    } else {
        advice.extend(LOW_LINES.iter().map(ToString::to_string));
        AlertLevel::Low
    };

    advice.extend(GENERAL_TIPS.iter().map(ToString::to_string));

    AdviceReport {
        advice,
        alert_level,
        high_levels,
        moderate_levels,
    }
}

/// `[Grass, Trees]` -> `"Grass, Trees"`.
fn joined_title(categories: &[Category]) -> String {
    let joined = categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    title_case(&joined)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
#[path = "advice_test.rs"]
mod tests;
