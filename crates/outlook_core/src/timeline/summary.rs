//! Per-date severity summaries for calendar views.

use crate::model::severity::{SeverityCatalog, UNRANKED};
use crate::model::style::LayerStyle;
use crate::timeline::date_index::DateIndex;
use chrono::NaiveDate;
use serde::Serialize;

/// Most severe label and hazard flag for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// `None` when no ranked severity was recorded for the date.
    pub dominant: Option<String>,
    pub has_ancillary_hazard: bool,
}

/// Day summary plus the fill style of its dominant label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    #[serde(flatten)]
    pub summary: DaySummary,
    pub style: Option<LayerStyle>,
}

/// Summarizes every overlay recorded for `date`, authoritative or not.
///
/// Unranked labels never become dominant; on equal ranks the first record wins.
pub fn dominant_severity(index: &DateIndex, date: NaiveDate, catalog: &SeverityCatalog) -> DaySummary {
    let entries = index.entries_on(date);
    let mut dominant: Option<(u8, &str)> = None;
    for entry in entries {
        let rank = catalog.rank(entry.label.as_str());
        if rank == UNRANKED {
            continue;
        }
        if dominant.map_or(true, |(best, _)| rank < best) {
            dominant = Some((rank, entry.label.as_str()));
        }
    }

    DaySummary {
        date,
        dominant: dominant.map(|(_, label)| label.to_string()),
        has_ancillary_hazard: entries
            .iter()
            .any(|entry| catalog.is_ancillary(entry.label.as_str())),
    }
}

/// Summaries for every indexed date, ascending.
pub fn calendar_summary(index: &DateIndex, catalog: &SeverityCatalog) -> Vec<CalendarDay> {
    index
        .dates()
        .map(|date| {
            let summary = dominant_severity(index, date, catalog);
            let style = summary
                .dominant
                .as_deref()
                .map(|label| catalog.style_for(label));
            CalendarDay { summary, style }
        })
        .collect()
}
