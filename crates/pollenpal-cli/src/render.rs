//! Plain-text rendering of pollen records and advice for the terminal.
//!
//! Every function returns a `String` and never prints, so output can be
//! asserted on directly.

use pollenpal_core::{
    advise, non_zero_entries, title_case, AdviceReport, Category, DayEntry, PollenRecord,
    GENERAL_TIPS, NO_DATA_ADVICE,
};

/// Optional sections shown after the current conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Sections {
    pub forecast: bool,
    pub detailed: bool,
    pub advice: bool,
}

impl Sections {
    pub(crate) const ALL: Self = Self {
        forecast: true,
        detailed: true,
        advice: true,
    };
}

const HIGH_HEADLINE: &str = "HIGH ALERT";
const MODERATE_HEADLINE: &str = "MODERATE:";
const LOW_HEADLINE: &str = "GOOD NEWS";

/// Traffic-light marker for a level string (case-insensitive).
#[must_use]
pub(crate) fn level_marker(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "low" => "🟢",
        "moderate" => "🟡",
        "high" | "very high" => "🔴",
        _ => "⚪",
    }
}

#[must_use]
pub(crate) fn format_level(level: &str) -> String {
    format!("{} {level}", level_marker(level))
}

/// Location heading, today's category levels and the detailed breakdown.
#[must_use]
pub(crate) fn current_conditions(record: &PollenRecord) -> String {
    let mut lines = vec![
        String::new(),
        format!("🌾 POLLEN REPORT FOR {}", record.location.to_uppercase()),
        "=".repeat(60),
    ];

    if let Some(current) = &record.current_day {
        lines.push(format!("📅 {} {}", current.day_name, current.day_number));
        lines.push(String::new());
        for category in Category::ALL {
            let reading = current.category(category);
            lines.push(format!(
                "{:<10} {:<15} {}",
                title_case(category.as_str()),
                format_level(&reading.level),
                reading.count
            ));
        }
    }

    if !record.detailed_breakdown.is_empty() {
        lines.push(String::new());
        lines.push("📊 DETAILED BREAKDOWN".to_string());
        lines.push("-".repeat(30));
        for (pollen_type, entry) in record.detailed_breakdown.iter() {
            lines.push(format!(
                "{:<10} {:<15} {}",
                title_case(pollen_type),
                format_level(&entry.level),
                entry.ppm
            ));
        }
    }

    lines.join("\n")
}

#[must_use]
pub(crate) fn forecast_table(record: &PollenRecord) -> String {
    if record.forecast.is_empty() {
        return "❌ No forecast data available".to_string();
    }

    let mut lines = vec![
        String::new(),
        "📈 5-DAY POLLEN FORECAST".to_string(),
        "=".repeat(80),
        format!("{:<8} {:<20} {:<20} {:<20}", "Day", "Grass", "Trees", "Weeds"),
        "-".repeat(80),
    ];
    lines.extend(record.forecast.iter().map(forecast_row));
    lines.join("\n")
}

fn forecast_row(day: &DayEntry) -> String {
    format!(
        "{:<8} {:<20} {:<20} {:<20}",
        day.day_name,
        format_level(&day.grass.level),
        format_level(&day.trees.level),
        format_level(&day.weeds.level)
    )
    .trim_end()
    .to_string()
}

/// Per-species readings decoded from today's detail strings. Zero readings
/// are omitted.
#[must_use]
pub(crate) fn detailed_analysis(record: &PollenRecord) -> String {
    let Some(current) = &record.current_day else {
        return "❌ No detailed data available".to_string();
    };

    let mut lines = vec![
        String::new(),
        "🔬 DETAILED POLLEN ANALYSIS".to_string(),
        "=".repeat(60),
    ];

    for category in Category::ALL {
        let heading = section_heading(category);
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.push("-".repeat(heading.len()));
        for entry in non_zero_entries(&current.category(category).detail) {
            lines.push(format!(
                "  {:<12} {:>6} PPM  {}",
                entry.name,
                entry.ppm,
                format_level(&entry.level)
            ));
        }
    }

    lines.join("\n")
}

fn section_heading(category: Category) -> &'static str {
    match category {
        Category::Grass => "GRASS POLLEN",
        Category::Trees => "TREE POLLEN",
        Category::Weeds => "WEED POLLEN",
    }
}

/// Advice lines with tier markers, tips bulleted, and the general tips set
/// off under their own heading.
#[must_use]
pub(crate) fn advice_section(report: &AdviceReport) -> String {
    let mut lines = vec![String::new(), "💊 HEALTH ADVICE".to_string(), "=".repeat(40)];

    for line in &report.advice {
        if line == GENERAL_TIPS[0] {
            lines.push(String::new());
            lines.push("💡 GENERAL TIPS:".to_string());
        }
        lines.push(decorate_advice_line(line));
    }

    lines.join("\n")
}

fn decorate_advice_line(line: &str) -> String {
    if line.starts_with(HIGH_HEADLINE) {
        format!("⚠️  {line}")
    } else if line.starts_with(MODERATE_HEADLINE) {
        format!("⚡ {line}")
    } else if line.starts_with(LOW_HEADLINE) {
        format!("✅ {line}")
    } else if line == NO_DATA_ADVICE {
        format!("❌ {line}")
    } else {
        format!("   • {line}")
    }
}

/// Current conditions followed by whichever optional sections are enabled.
#[must_use]
pub(crate) fn report(record: &PollenRecord, sections: Sections) -> String {
    let mut parts = vec![current_conditions(record)];
    if sections.forecast {
        parts.push(forecast_table(record));
    }
    if sections.detailed {
        parts.push(detailed_analysis(record));
    }
    if sections.advice {
        parts.push(advice_section(&advise(Some(record))));
    }
    parts.join("\n")
}
