//! Parser for the per-category `detail` attribute.
//!
//! Upstream encodes a category's species breakdown as
//! `name,ppm,level|name,ppm,level`. Entries with fewer than three fields or a
//! ppm that is not a non-negative integer are skipped.

use serde::Serialize;

/// One species reading inside a category's `detail` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub name: String,
    pub ppm: u64,
    pub level: String,
}

/// Parses an encoded detail string into its well-formed entries, in order.
#[must_use]
pub fn parse_detail(raw: &str) -> Vec<DetailEntry> {
    raw.split('|').filter_map(parse_entry).collect()
}

/// Entries with a non-zero ppm, the subset worth displaying.
#[must_use]
pub fn non_zero_entries(raw: &str) -> Vec<DetailEntry> {
    parse_detail(raw)
        .into_iter()
        .filter(|entry| entry.ppm > 0)
        .collect()
}

fn parse_entry(raw: &str) -> Option<DetailEntry> {
    let mut fields = raw.split(',');
    let name = fields.next()?.trim();
    let ppm = fields.next()?.trim();
    let level = fields.next()?.trim();

    let ppm = ppm.parse::<u64>().ok()?;

    Some(DetailEntry {
        name: name.to_string(),
        ppm,
        level: level.to_string(),
    })
}
