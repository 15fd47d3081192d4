//! Normalized pollen record produced from one upstream query.
//!
//! Every field has an empty default so a record built from partial markup is
//! still complete. Numeric-looking fields (`count`, `ppm`) are kept as the
//! upstream text and only parsed where a consumer needs a number.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::detail::{parse_detail, DetailEntry};

/// The three pollen categories reported for every forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grass,
    Trees,
    Weeds,
}

impl Category {
    /// Fixed reporting order used by the advisor and all renderers.
    pub const ALL: [Category; 3] = [Category::Grass, Category::Trees, Category::Weeds];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Grass => "grass",
            Category::Trees => "trees",
            Category::Weeds => "weeds",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollenRecord {
    pub location: String,
    pub coordinates: Coordinates,
    /// The forecast day flagged as active upstream. Serialized as `{}` when absent.
    #[serde(serialize_with = "serialize_current_day")]
    pub current_day: Option<DayEntry>,
    pub forecast: Vec<DayEntry>,
    pub detailed_breakdown: DetailedBreakdown,
}

/// Latitude/longitude pair as decimal-degree strings.
///
/// Upstream only ever exposes both inputs together, so the pair is either
/// fully populated or fully empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    latitude: String,
    longitude: String,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latitude.is_empty() && self.longitude.is_empty()
    }
}

/// One day's forecast, as read from a single day button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub day_name: String,
    pub day_number: String,
    pub grass: CategoryLevel,
    pub trees: CategoryLevel,
    pub weeds: CategoryLevel,
}

impl DayEntry {
    #[must_use]
    pub fn category(&self, category: Category) -> &CategoryLevel {
        match category {
            Category::Grass => &self.grass,
            Category::Trees => &self.trees,
            Category::Weeds => &self.weeds,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryLevel {
    /// Severity text, usually `Low`, `Moderate`, `High` or `Very High`.
    pub level: String,
    pub count: String,
    /// Encoded sub-breakdown: `name,ppm,level|name,ppm,level`.
    pub detail: String,
}

impl CategoryLevel {
    /// Parsed entries of [`Self::detail`]; malformed entries are dropped.
    #[must_use]
    pub fn detail_entries(&self) -> Vec<DetailEntry> {
        parse_detail(&self.detail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub level: String,
    pub ppm: String,
}

/// Pollen-type key to breakdown entry, in first-seen order.
///
/// Keys are unique. Inserting an existing key replaces its entry but keeps
/// the original position, matching ordinary mapping semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedBreakdown {
    entries: Vec<(String, BreakdownEntry)>,
}

impl DetailedBreakdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: BreakdownEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BreakdownEntry> {
        self.entries
            .iter()
            .find_map(|(k, entry)| (k == key).then_some(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BreakdownEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DetailedBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Serializes an optional day as the day itself, or `{}` when absent.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize_current_day<S: Serializer>(
    day: &Option<DayEntry>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match day {
        Some(day) => day.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
