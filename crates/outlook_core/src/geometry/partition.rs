//! Severity-priority overlap resolution.
//!
//! # Responsibility
//! - Turn the overlapping regions of one overlay into a partition where the
//!   more severe label owns every contested area.
//! - Pass ancillary hazard outlines through untouched.
//!
//! # Invariants
//! - Severity regions are processed tier by tier, most severe first; each
//!   region is clipped by strictly higher tiers already placed, then by
//!   earlier regions of its own tier with a different label.
//! - Equal-rank regions keep their input order; same-label regions never clip
//!   each other.
//! - Output lists severity regions first, then hazards in input order.
//! - The resolver is pure: same input regions, same partition.

use crate::geometry::repair::{repair, RepairError};
use crate::model::overlay::Overlay;
use crate::model::region::Region;
use crate::model::severity::{processing_order, SeverityCatalog};
use crate::model::style::LayerStyle;
use geo::{Area, BooleanOps, MultiPolygon};
use log::{debug, warn};
use serde::Serialize;

/// Overlap area (square degrees) below which two regions count as disjoint.
///
/// Roughly one square metre at UK latitudes; absorbs boolean-op rounding.
pub const AREA_EPSILON: f64 = 1e-10;

/// Non-overlapping output of overlap resolution for one overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Partition {
    regions: Vec<Region>,
}

impl Partition {
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<Region> {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Distinct labels in first-appearance order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for region in &self.regions {
            if !labels.contains(&region.label.as_str()) {
                labels.push(region.label.as_str());
            }
        }
        labels
    }

    /// Pairs every region with its renderer style, preserving draw order.
    pub fn styled<'a>(&'a self, catalog: &SeverityCatalog) -> Vec<StyledRegion<'a>> {
        self.regions
            .iter()
            .map(|region| StyledRegion {
                region,
                style: catalog.style_for(region.label.as_str()),
            })
            .collect()
    }
}

/// Region plus the style a renderer should paint it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRegion<'a> {
    pub region: &'a Region,
    pub style: LayerStyle,
}

/// Why a region did not make it into the partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Geometry could not be made valid.
    RepairFailed(RepairError),
    /// Higher tiers claimed the whole area; an expected outcome.
    EmptyAfterClipping,
}

/// One region removed during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRegion {
    pub label: String,
    pub reason: DropReason,
}

/// Partition plus the regions dropped while building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionOutcome {
    pub partition: Partition,
    pub dropped: Vec<DroppedRegion>,
}

/// Resolves the regions of one parsed overlay.
pub fn resolve_partition(overlay: &Overlay, catalog: &SeverityCatalog) -> PartitionOutcome {
    resolve_regions(overlay.identifier(), overlay.regions(), catalog)
}

/// Resolves an ordered region list; `identifier` only labels diagnostics.
pub fn resolve_regions(
    identifier: &str,
    regions: &[Region],
    catalog: &SeverityCatalog,
) -> PartitionOutcome {
    let (hazards, mut claimants): (Vec<&Region>, Vec<&Region>) = regions
        .iter()
        .partition(|region| catalog.is_ancillary(region.label.as_str()));
    // Stable sort: equal ranks keep input order.
    claimants.sort_by_key(|region| processing_order(catalog.rank(region.label.as_str())));

    let mut outcome = PartitionOutcome::default();
    let mut claimed = MultiPolygon::<f64>::new(Vec::new());
    for tier in claimants.chunk_by(|left, right| {
        catalog.rank(left.label.as_str()) == catalog.rank(right.label.as_str())
    }) {
        let placed = clip_tier(identifier, tier, &claimed, &mut outcome.dropped);
        for region in &placed {
            claimed = if claimed.0.is_empty() {
                region.geometry.clone()
            } else {
                claimed.union(&region.geometry)
            };
        }
        outcome.partition.regions.extend(placed);
    }

    outcome
        .partition
        .regions
        .extend(hazards.into_iter().cloned());
    outcome
}

/// Clips one equal-rank tier against the area claimed by higher tiers.
///
/// Distinct labels inside a tier (only possible for unranked labels) are
/// resolved first-come in input order.
fn clip_tier(
    identifier: &str,
    tier: &[&Region],
    claimed: &MultiPolygon<f64>,
    dropped: &mut Vec<DroppedRegion>,
) -> Vec<Region> {
    let mut placed: Vec<Region> = Vec::with_capacity(tier.len());
    for region in tier {
        let geometry = match repair(&region.geometry) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!(
                    "event=region_dropped module=partition status=warn reason=repair_failed identifier={} label={} error={}",
                    identifier, region.label, err
                );
                dropped.push(DroppedRegion {
                    label: region.label.clone(),
                    reason: DropReason::RepairFailed(err),
                });
                continue;
            }
        };

        let mut remaining = subtract_claimed(geometry, claimed);
        for rival in placed
            .iter()
            .filter(|other| other.label != region.label)
        {
            remaining = subtract_claimed(remaining, &rival.geometry);
        }
        if remaining.unsigned_area() <= AREA_EPSILON {
            debug!(
                "event=region_dropped module=partition status=ok reason=empty_after_clipping identifier={} label={}",
                identifier, region.label
            );
            dropped.push(DroppedRegion {
                label: region.label.clone(),
                reason: DropReason::EmptyAfterClipping,
            });
            continue;
        }
        placed.push(region.with_geometry(remaining));
    }
    placed
}

// Geometry that does not overlap the claimed area is kept as-is so that
// resolving an existing partition leaves it untouched.
fn subtract_claimed(geometry: MultiPolygon<f64>, claimed: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    if claimed.0.is_empty() || geometry.intersection(claimed).unsigned_area() <= AREA_EPSILON {
        return geometry;
    }
    geometry.difference(claimed)
}
