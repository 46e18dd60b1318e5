//! Labeled region model.
//!
//! # Invariants
//! - A region carries exactly one label.
//! - Regions are never mutated by resolvers; clipping derives new regions.

use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// One source feature: a (multi)polygon tagged with a severity or hazard label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub label: String,
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    /// Creates a region from any polygonal geometry.
    pub fn new(label: impl Into<String>, geometry: impl Into<MultiPolygon<f64>>) -> Self {
        Self {
            label: label.into(),
            geometry: geometry.into(),
        }
    }

    /// Derives a region with the same label and replaced geometry.
    pub fn with_geometry(&self, geometry: MultiPolygon<f64>) -> Self {
        Self {
            label: self.label.clone(),
            geometry,
        }
    }

    /// Returns the polygon parts of this region.
    pub fn parts(&self) -> &[Polygon<f64>] {
        &self.geometry.0
    }
}
