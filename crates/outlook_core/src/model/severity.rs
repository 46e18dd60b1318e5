//! Severity catalog: label ranking and ancillary hazard classification.
//!
//! # Responsibility
//! - Map outlook labels to an area-priority rank.
//! - Classify outline-only ancillary hazard labels.
//! - Carry the renderer-facing style of every known label.
//!
//! # Invariants
//! - Ranks are unique and `>= 1`; smaller rank = more severe.
//! - `UNRANKED` (0) is the weakest claimant, never the most severe.
//! - A label is either ranked, ancillary, or unknown; never two of them.
//! - Lookups are exact and case-sensitive.

use crate::model::style::LayerStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sentinel rank for labels outside the ranked severity levels.
pub const UNRANKED: u8 = 0;

const DEFAULT_HAZARD_COLOR: &str = "black";
const DEFAULT_FALLBACK_COLOR: &str = "gray";

/// One ranked severity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityLevel {
    /// Exact label as it appears in source overlays, e.g. `High risk`.
    pub label: String,
    /// Area priority; smaller = more severe.
    pub rank: u8,
    /// Fill color handed to renderers.
    pub fill_color: String,
}

impl SeverityLevel {
    fn new(label: &str, rank: u8, fill_color: &str) -> Self {
        Self {
            label: label.to_string(),
            rank,
            fill_color: fill_color.to_string(),
        }
    }
}

/// Serialized catalog shape used for alternate severity schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub levels: Vec<SeverityLevel>,
    #[serde(default)]
    pub hazards: Vec<String>,
    #[serde(default = "default_hazard_color")]
    pub hazard_color: String,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

fn default_hazard_color() -> String {
    DEFAULT_HAZARD_COLOR.to_string()
}

fn default_fallback_color() -> String {
    DEFAULT_FALLBACK_COLOR.to_string()
}

/// Validation errors for catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog has no ranked levels.
    NoLevels,
    /// A level or hazard label is blank.
    EmptyLabel,
    /// A level uses the reserved unranked sentinel.
    ReservedRank(String),
    /// The same label is declared twice.
    DuplicateLabel(String),
    /// Two levels share one rank.
    DuplicateRank(u8),
    /// A label is declared both as level and hazard.
    RankedHazard(String),
    /// Config text is not valid catalog JSON.
    Malformed(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLevels => write!(f, "severity catalog must declare at least one level"),
            Self::EmptyLabel => write!(f, "severity catalog labels must not be blank"),
            Self::ReservedRank(label) => {
                write!(f, "level `{label}` uses reserved rank {UNRANKED}")
            }
            Self::DuplicateLabel(label) => write!(f, "duplicate catalog label `{label}`"),
            Self::DuplicateRank(rank) => write!(f, "duplicate severity rank {rank}"),
            Self::RankedHazard(label) => {
                write!(f, "label `{label}` cannot be both ranked and ancillary")
            }
            Self::Malformed(message) => write!(f, "malformed severity catalog: {message}"),
        }
    }
}

impl Error for CatalogError {}

/// Injected severity scheme used by the overlap and timeline resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityCatalog {
    levels: Vec<SeverityLevel>,
    hazards: Vec<String>,
    hazard_color: String,
    fallback_color: String,
}

impl Default for SeverityCatalog {
    /// Built-in convective outlook scheme.
    fn default() -> Self {
        Self {
            levels: vec![
                SeverityLevel::new("High risk", 2, "purple"),
                SeverityLevel::new("Moderate risk", 3, "red"),
                SeverityLevel::new("Enhanced risk", 4, "orange"),
                SeverityLevel::new("Slight risk", 5, "yellow"),
                SeverityLevel::new("Low risk", 6, "#5aac91"),
            ],
            hazards: vec![
                "Risk of flooding".to_string(),
                "Risk of large hail".to_string(),
                "Risk of tornado".to_string(),
                "Risk of strong gusts".to_string(),
                "Risk of large hail, flooding and tornado".to_string(),
            ],
            hazard_color: default_hazard_color(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl SeverityCatalog {
    /// Builds a catalog from config after validating it.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.levels.is_empty() {
            return Err(CatalogError::NoLevels);
        }

        let mut labels = BTreeSet::new();
        let mut ranks = BTreeSet::new();
        for level in &config.levels {
            if level.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if level.rank == UNRANKED {
                return Err(CatalogError::ReservedRank(level.label.clone()));
            }
            if !labels.insert(level.label.as_str()) {
                return Err(CatalogError::DuplicateLabel(level.label.clone()));
            }
            if !ranks.insert(level.rank) {
                return Err(CatalogError::DuplicateRank(level.rank));
            }
        }

        let mut hazard_labels = BTreeSet::new();
        for hazard in &config.hazards {
            if hazard.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if labels.contains(hazard.as_str()) {
                return Err(CatalogError::RankedHazard(hazard.clone()));
            }
            if !hazard_labels.insert(hazard.as_str()) {
                return Err(CatalogError::DuplicateLabel(hazard.clone()));
            }
        }

        let mut levels = config.levels;
        levels.sort_by_key(|level| level.rank);
        Ok(Self {
            levels,
            hazards: config.hazards,
            hazard_color: config.hazard_color,
            fallback_color: config.fallback_color,
        })
    }

    /// Parses and validates a JSON catalog config.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig =
            serde_json::from_str(raw).map_err(|err| CatalogError::Malformed(err.to_string()))?;
        Self::from_config(config)
    }

    /// Returns the config shape of this catalog.
    pub fn to_config(&self) -> CatalogConfig {
        CatalogConfig {
            levels: self.levels.clone(),
            hazards: self.hazards.clone(),
            hazard_color: self.hazard_color.clone(),
            fallback_color: self.fallback_color.clone(),
        }
    }

    /// Ranked levels, most severe first.
    pub fn levels(&self) -> &[SeverityLevel] {
        &self.levels
    }

    /// Ancillary hazard labels in declaration order.
    pub fn hazards(&self) -> &[String] {
        &self.hazards
    }

    /// Returns the rank of `label`, or [`UNRANKED`] when it is not a level.
    pub fn rank(&self, label: &str) -> u8 {
        self.level(label).map_or(UNRANKED, |level| level.rank)
    }

    /// Returns whether `label` is an outline-only ancillary hazard.
    pub fn is_ancillary(&self, label: &str) -> bool {
        self.hazards.iter().any(|hazard| hazard == label)
    }

    /// Returns whether `label` carries a ranked severity.
    pub fn is_ranked(&self, label: &str) -> bool {
        self.level(label).is_some()
    }

    /// Renderer style for `label`; unknown labels get the fallback color.
    pub fn style_for(&self, label: &str) -> LayerStyle {
        if self.is_ancillary(label) {
            return LayerStyle::outline(self.hazard_color.as_str());
        }
        match self.level(label) {
            Some(level) => LayerStyle::fill(level.fill_color.as_str()),
            None => LayerStyle::fill(self.fallback_color.as_str()),
        }
    }

    fn level(&self, label: &str) -> Option<&SeverityLevel> {
        self.levels.iter().find(|level| level.label == label)
    }
}

/// Processing position of a rank in the overlap cascade.
///
/// Ranked labels come first by ascending rank; unranked labels come last.
pub fn processing_order(rank: u8) -> u16 {
    if rank == UNRANKED {
        u16::MAX
    } else {
        u16::from(rank)
    }
}
