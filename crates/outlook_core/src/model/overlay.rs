//! Overlay snapshot model.
//!
//! # Responsibility
//! - Represent one issued outlook: identifier, CRS, regions and validity.
//! - Bridge loader output (`SourceOverlay`) to parsed, versioned overlays.
//!
//! # Invariants
//! - `validity.start <= validity.end` and `validity.version >= 1`.
//! - An `Overlay` is never mutated after construction.

use crate::geometry::partition::Partition;
use crate::model::region::Region;
use crate::parse::identifier::{parse_identifier, IdentifierParseError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Coordinate reference system of overlay geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crs {
    /// Loaders reproject every source file to WGS84 lon/lat.
    #[default]
    #[serde(rename = "EPSG:4326")]
    Wgs84,
}

/// Validity window and version extracted from an overlay identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutlookValidity {
    /// Inclusive start on the issuing office's local clock.
    pub start: NaiveDateTime,
    /// Inclusive end on the issuing office's local clock.
    pub end: NaiveDateTime,
    pub version: u32,
}

impl OutlookValidity {
    /// Returns whether the exact `instant` lies in `[start, end]`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Calendar days touched by the window, start date through end date.
    pub fn covered_dates(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date();
        self.start
            .date()
            .iter_days()
            .take_while(move |date| *date <= last)
    }

    /// Returns whether the window is ordered and carries a real version.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end && self.version >= 1
    }

    /// Returns whether two windows share at least one instant.
    pub fn overlaps(&self, other: &OutlookValidity) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Loader output for one source file, before identifier parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOverlay {
    pub identifier: String,
    #[serde(default)]
    pub crs: Crs,
    pub regions: Vec<Region>,
}

/// Parsed, versioned overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    identifier: String,
    crs: Crs,
    regions: Vec<Region>,
    validity: OutlookValidity,
}

impl Overlay {
    /// Parses the identifier of `source` and builds an immutable overlay.
    pub fn from_source(source: SourceOverlay) -> Result<Self, IdentifierParseError> {
        let validity = parse_identifier(source.identifier.as_str())?;
        Ok(Self {
            identifier: source.identifier,
            crs: source.crs,
            regions: source.regions,
            validity,
        })
    }

    /// Builds an overlay with an already-known validity window.
    ///
    /// `validity` must be well formed; identifier parsing guarantees this for
    /// `from_source`.
    pub fn with_validity(
        identifier: impl Into<String>,
        regions: Vec<Region>,
        validity: OutlookValidity,
    ) -> Self {
        debug_assert!(
            validity.is_well_formed(),
            "malformed validity window: {validity:?}"
        );
        Self {
            identifier: identifier.into(),
            crs: Crs::Wgs84,
            regions,
            validity,
        }
    }

    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn validity(&self) -> &OutlookValidity {
        &self.validity
    }
}

/// Overlay paired with its resolved partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOverlay {
    pub overlay: Overlay,
    pub partition: Partition,
}

/// Read access shared by anything the timeline resolver can rank.
pub trait Versioned {
    fn identifier(&self) -> &str;
    fn validity(&self) -> &OutlookValidity;
}

impl Versioned for Overlay {
    fn identifier(&self) -> &str {
        Overlay::identifier(self)
    }

    fn validity(&self) -> &OutlookValidity {
        Overlay::validity(self)
    }
}

impl Versioned for ResolvedOverlay {
    fn identifier(&self) -> &str {
        self.overlay.identifier()
    }

    fn validity(&self) -> &OutlookValidity {
        self.overlay.validity()
    }
}
