//! Per-date index of issued overlays.
//!
//! # Invariants
//! - Every calendar day from an overlay's start date to its end date is keyed,
//!   even when the overlay's partition is empty.
//! - Entries keep overlay input order, then label first-appearance order.
//! - Keys are ordered, so iteration and serialization are deterministic.

use crate::model::overlay::ResolvedOverlay;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One `(overlay, label, version)` record for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateEntry {
    pub identifier: String,
    pub label: String,
    pub version: u32,
}

/// Calendar date -> overlay label records valid on that date.
///
/// Serializes as a map keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateIndex {
    entries: BTreeMap<NaiveDate, Vec<DateEntry>>,
}

impl DateIndex {
    /// Records valid on `date`; empty when nothing was issued.
    pub fn entries_on(&self, date: NaiveDate) -> &[DateEntry] {
        self.entries.get(&date).map_or(&[][..], Vec::as_slice)
    }

    /// Lookup by `YYYY-MM-DD` key. Malformed keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&[DateEntry]> {
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
        self.entries.get(&date).map(Vec::as_slice)
    }

    /// Indexed dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[DateEntry])> + '_ {
        self.entries
            .iter()
            .map(|(date, entries)| (*date, entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the date index for every resolved overlay.
pub fn build_date_index(overlays: &[ResolvedOverlay]) -> DateIndex {
    let mut entries: BTreeMap<NaiveDate, Vec<DateEntry>> = BTreeMap::new();
    for resolved in overlays {
        let validity = resolved.overlay.validity();
        let labels = resolved.partition.labels();
        for date in validity.covered_dates() {
            let day = entries.entry(date).or_default();
            day.extend(labels.iter().map(|label| DateEntry {
                identifier: resolved.overlay.identifier().to_string(),
                label: (*label).to_string(),
                version: validity.version,
            }));
        }
    }
    DateIndex { entries }
}
