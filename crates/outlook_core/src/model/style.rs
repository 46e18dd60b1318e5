//! Renderer-facing style descriptors.
//!
//! The core never draws anything; these values are the data renderers need
//! to paint a partition in order.

use serde::{Deserialize, Serialize};

const FILL_OPACITY: f32 = 0.3;
const FILL_WEIGHT: u8 = 1;
const OUTLINE_WEIGHT: u8 = 2;

/// Paint style for one labeled layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub fill_color: String,
    pub stroke_color: String,
    pub weight: u8,
    pub fill_opacity: f32,
    /// Outline-only layers carry no fill and no area priority.
    pub outline_only: bool,
}

impl LayerStyle {
    /// Semi-transparent filled layer.
    pub fn fill(color: &str) -> Self {
        Self {
            fill_color: color.to_string(),
            stroke_color: color.to_string(),
            weight: FILL_WEIGHT,
            fill_opacity: FILL_OPACITY,
            outline_only: false,
        }
    }

    /// Thicker unfilled outline used for ancillary hazards.
    pub fn outline(color: &str) -> Self {
        Self {
            fill_color: color.to_string(),
            stroke_color: color.to_string(),
            weight: OUTLINE_WEIGHT,
            fill_opacity: 0.0,
            outline_only: true,
        }
    }
}

/// Fixed viewport handed to the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl MapFrame {
    /// British Isles frame used by the published outlook map.
    pub fn uk() -> Self {
        Self {
            min_lat: 47.0,
            max_lat: 62.0,
            min_lon: -11.0,
            max_lon: 3.0,
            center_lat: 54.013176,
            center_lon: 2.3252278,
            zoom: 7,
        }
    }

    /// Returns whether a WGS84 point lies inside the frame bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}
