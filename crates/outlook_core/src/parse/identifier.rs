//! Overlay identifier parsing.
//!
//! # Responsibility
//! - Extract the validity window and version from an outlook file name.
//!
//! # Invariants
//! - No update marker -> version 1; bare marker -> 2; marker `N` -> `N + 1`.
//! - The parenthesized duplicate index never affects the result.
//! - Non-matching input yields an error value, never a panic.

use crate::model::overlay::OutlookValidity;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:.*?\s+)?outlook(?:\s+(?P<marker>updated|update)(?P<revision>\d+)?)?\s+(?P<start_date>\d{8})\s+(?P<start_time>\d{4})\s*-\s*(?P<end_date>\d{8})\s+(?P<end_time>\d{4})(?:\s*\(\d+\))?(?:\.[a-z0-9]+)?$",
    )
    .expect("valid outlook identifier regex")
});

/// Reasons an identifier cannot be turned into a validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierParseError {
    /// Identifier does not follow the outlook naming grammar.
    NoMatch(String),
    /// `DDMMYYYY` group is not a calendar date.
    InvalidDate(String),
    /// `HHMM` group is not a wall-clock time.
    InvalidTime(String),
    /// End of the window precedes its start.
    ReversedWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Update revision is too large to bump.
    VersionOverflow(String),
}

impl Display for IdentifierParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch(value) => write!(f, "identifier does not match outlook grammar: `{value}`"),
            Self::InvalidDate(value) => write!(f, "invalid outlook date `{value}`"),
            Self::InvalidTime(value) => write!(f, "invalid outlook time `{value}`"),
            Self::ReversedWindow { start, end } => {
                write!(f, "outlook window ends ({end}) before it starts ({start})")
            }
            Self::VersionOverflow(value) => write!(f, "update revision out of range: `{value}`"),
        }
    }
}

impl Error for IdentifierParseError {}

/// Parses `<base> Outlook[ UPDATE[D][N]] DDMMYYYY HHMM - DDMMYYYY HHMM[ (k)][.ext]`.
pub fn parse_identifier(identifier: &str) -> Result<OutlookValidity, IdentifierParseError> {
    let trimmed = identifier.trim();
    let captures = IDENTIFIER_RE
        .captures(trimmed)
        .ok_or_else(|| IdentifierParseError::NoMatch(trimmed.to_string()))?;

    let start = parse_instant(&captures, "start_date", "start_time")?;
    let end = parse_instant(&captures, "end_date", "end_time")?;
    if end < start {
        return Err(IdentifierParseError::ReversedWindow { start, end });
    }

    Ok(OutlookValidity {
        start,
        end,
        version: parse_version(&captures)?,
    })
}

fn parse_version(captures: &Captures<'_>) -> Result<u32, IdentifierParseError> {
    if captures.name("marker").is_none() {
        return Ok(1);
    }
    let Some(revision) = captures.name("revision") else {
        return Ok(2);
    };
    revision
        .as_str()
        .parse::<u32>()
        .ok()
        .and_then(|value| value.checked_add(1))
        .ok_or_else(|| IdentifierParseError::VersionOverflow(revision.as_str().to_string()))
}

fn parse_instant(
    captures: &Captures<'_>,
    date_group: &str,
    time_group: &str,
) -> Result<NaiveDateTime, IdentifierParseError> {
    let date = parse_date(group(captures, date_group))?;
    let time = parse_time(group(captures, time_group))?;
    Ok(date.and_time(time))
}

fn group<'h>(captures: &Captures<'h>, name: &str) -> &'h str {
    captures.name(name).map_or("", |value| value.as_str())
}

// Both groups are fixed-width ASCII digits once the regex has matched.
fn digits(raw: &str, range: std::ops::Range<usize>) -> Option<u32> {
    raw.get(range).and_then(|value| value.parse::<u32>().ok())
}

fn parse_date(raw: &str) -> Result<NaiveDate, IdentifierParseError> {
    let invalid = || IdentifierParseError::InvalidDate(raw.to_string());
    let day = digits(raw, 0..2).ok_or_else(invalid)?;
    let month = digits(raw, 2..4).ok_or_else(invalid)?;
    let year = digits(raw, 4..8).ok_or_else(invalid)?;
    let year = i32::try_from(year).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_time(raw: &str) -> Result<NaiveTime, IdentifierParseError> {
    let invalid = || IdentifierParseError::InvalidTime(raw.to_string());
    let hour = digits(raw, 0..2).ok_or_else(invalid)?;
    let minute = digits(raw, 2..4).ok_or_else(invalid)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::{parse_identifier, IdentifierParseError};

    #[test]
    fn base_tag_is_optional() {
        let plain = parse_identifier("Outlook 01082024 0000 - 01082024 2359.kml")
            .expect("identifier without base");
        let tagged = parse_identifier("Convective Outlook 01082024 0000 - 01082024 2359.kml")
            .expect("identifier with base");
        assert_eq!(plain, tagged);
    }

    #[test]
    fn marker_is_case_insensitive() {
        let validity = parse_identifier("Convective outlook updated 01082024 0000 - 01082024 2359")
            .expect("lowercase marker");
        assert_eq!(validity.version, 2);
    }

    #[test]
    fn duplicate_index_is_ignored() {
        let validity =
            parse_identifier("Convective Outlook UPDATED2 01082024 0000 - 01082024 2359 (1).kml")
                .expect("duplicate index");
        assert_eq!(validity.version, 3);
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        let err = parse_identifier("Outlook 32082024 0000 - 01092024 2359").unwrap_err();
        assert_eq!(err, IdentifierParseError::InvalidDate("32082024".to_string()));
    }

    #[test]
    fn rejects_impossible_time() {
        let err = parse_identifier("Outlook 01082024 2400 - 02082024 0600").unwrap_err();
        assert_eq!(err, IdentifierParseError::InvalidTime("2400".to_string()));
    }

    #[test]
    fn rejects_reversed_window() {
        let err = parse_identifier("Outlook 02082024 0000 - 01082024 2359").unwrap_err();
        assert!(matches!(err, IdentifierParseError::ReversedWindow { .. }));
    }

    #[test]
    fn rejects_revision_overflow() {
        let err = parse_identifier("Outlook UPDATED4294967295 01082024 0000 - 01082024 2359")
            .unwrap_err();
        assert!(matches!(err, IdentifierParseError::VersionOverflow(_)));
    }
}
