//! Extraction of a [`PollenRecord`] from the pollen widget's HTML fragment.
//!
//! ## Observed markup
//!
//! The endpoint returns an HTML fragment (not a full page) containing:
//!
//! - `<input id="cityName" value="London">`: resolved location name.
//! - `<input class="pollen-lat" value="51.50">` and
//!   `<input class="pollen-lng" value="-0.12">`: always emitted together.
//! - One `<button class="day-link">` per forecast day, with
//!   `<span class="day-name">` / `<span class="day-number">` children and the
//!   readings as data attributes. The trees and weeds detail attributes use the
//!   singular form (`data-tree-detail`, `data-weed-detail`). Today's button
//!   also carries the `active` class.
//! - `<li class="diagram-container" data-details="grass">` blocks holding
//!   `<p class="level-text">` and `<p class="ppm-level">` for the active day.
//!
//! Each field is read independently and falls back to its empty default, so a
//! partial or restyled fragment still produces a complete record.

mod query;

use pollenpal_core::{
    BreakdownEntry, CategoryLevel, Coordinates, DayEntry, DetailedBreakdown, PollenRecord,
};
use scraper::Html;

pub use query::{HtmlNode, MarkupNode, Query};

const CITY_INPUT: Query<'static> = Query::Id {
    tag: "input",
    id: "cityName",
};
const LAT_INPUT: Query<'static> = Query::Class {
    tag: "input",
    class: "pollen-lat",
};
const LNG_INPUT: Query<'static> = Query::Class {
    tag: "input",
    class: "pollen-lng",
};
const DAY_BUTTON: Query<'static> = Query::Class {
    tag: "button",
    class: "day-link",
};
const DAY_NAME: Query<'static> = Query::Class {
    tag: "span",
    class: "day-name",
};
const DAY_NUMBER: Query<'static> = Query::Class {
    tag: "span",
    class: "day-number",
};
const DIAGRAM: Query<'static> = Query::Class {
    tag: "li",
    class: "diagram-container",
};
const LEVEL_TEXT: Query<'static> = Query::Class {
    tag: "p",
    class: "level-text",
};
const PPM_LEVEL: Query<'static> = Query::Class {
    tag: "p",
    class: "ppm-level",
};

const ACTIVE_CLASS: &str = "active";

/// Level, count and detail attribute names for one category on a day button.
struct CategoryAttrs {
    level: &'static str,
    count: &'static str,
    detail: &'static str,
}

const GRASS_ATTRS: CategoryAttrs = CategoryAttrs {
    level: "data-grass",
    count: "data-grass-count",
    detail: "data-grass-detail",
};
const TREES_ATTRS: CategoryAttrs = CategoryAttrs {
    level: "data-trees",
    count: "data-trees-count",
    detail: "data-tree-detail",
};
const WEEDS_ATTRS: CategoryAttrs = CategoryAttrs {
    level: "data-weeds",
    count: "data-weeds-count",
    detail: "data-weed-detail",
};

/// Parses `markup` and extracts a [`PollenRecord`].
///
/// Never fails: anything missing from the markup takes its empty default.
#[must_use]
pub fn extract(markup: &str) -> PollenRecord {
    let document = Html::parse_document(markup);
    extract_from(&HtmlNode::new(document.root_element()))
}

/// Extraction rules over any [`MarkupNode`] tree rooted at `root`.
#[must_use]
pub fn extract_from<N: MarkupNode>(root: &N) -> PollenRecord {
    let mut record = PollenRecord {
        location: extract_location(root),
        coordinates: extract_coordinates(root),
        detailed_breakdown: extract_breakdown(root),
        ..PollenRecord::default()
    };

    for button in root.find_all(DAY_BUTTON) {
        let day = extract_day(&button);
        // Last active-marked button wins if upstream flags more than one.
        if button.has_class(ACTIVE_CLASS) {
            record.current_day = Some(day.clone());
        }
        record.forecast.push(day);
    }

    record
}

fn extract_location<N: MarkupNode>(root: &N) -> String {
    root.find(CITY_INPUT)
        .map(|input| attr_or_empty(&input, "value"))
        .unwrap_or_default()
}

fn extract_coordinates<N: MarkupNode>(root: &N) -> Coordinates {
    match (root.find(LAT_INPUT), root.find(LNG_INPUT)) {
        (Some(lat), Some(lng)) => {
            Coordinates::new(attr_or_empty(&lat, "value"), attr_or_empty(&lng, "value"))
        }
        _ => Coordinates::default(),
    }
}

fn extract_day<N: MarkupNode>(button: &N) -> DayEntry {
    DayEntry {
        day_name: child_text(button, DAY_NAME),
        day_number: child_text(button, DAY_NUMBER),
        grass: extract_category(button, &GRASS_ATTRS),
        trees: extract_category(button, &TREES_ATTRS),
        weeds: extract_category(button, &WEEDS_ATTRS),
    }
}

fn extract_category<N: MarkupNode>(button: &N, attrs: &CategoryAttrs) -> CategoryLevel {
    CategoryLevel {
        level: attr_or_empty(button, attrs.level),
        count: attr_or_empty(button, attrs.count),
        detail: attr_or_empty(button, attrs.detail),
    }
}

fn extract_breakdown<N: MarkupNode>(root: &N) -> DetailedBreakdown {
    let mut breakdown = DetailedBreakdown::new();
    for container in root.find_all(DIAGRAM) {
        let key = attr_or_empty(&container, "data-details");
        if key.is_empty() {
            continue;
        }
        breakdown.insert(
            key,
            BreakdownEntry {
                level: child_text(&container, LEVEL_TEXT),
                ppm: child_text(&container, PPM_LEVEL),
            },
        );
    }
    breakdown
}

fn attr_or_empty<N: MarkupNode>(node: &N, name: &str) -> String {
    node.attr(name).unwrap_or_default().to_string()
}

fn child_text<N: MarkupNode>(node: &N, query: Query<'_>) -> String {
    node.find(query)
        .map(|child| child.text().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
