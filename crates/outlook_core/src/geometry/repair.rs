//! Geometry validity repair.
//!
//! # Invariants
//! - Valid input is returned unchanged.
//! - Output of a successful repair passes OGC validity checks.
//! - Repair never panics; boolean-op failures surface as `RepairError`.

use geo::{BooleanOps, CoordsIter, MultiPolygon, Validation};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Reasons a region geometry cannot be made valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate,
    /// Self-union did not yield valid geometry.
    Unrepairable(String),
}

impl Display for RepairError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteCoordinate => write!(f, "geometry has non-finite coordinates"),
            Self::Unrepairable(details) => write!(f, "geometry cannot be repaired: {details}"),
        }
    }
}

impl Error for RepairError {}

/// Returns a valid version of `geometry`.
///
/// Invalid rings (self-touching, bow-tie, unclosed) are rebuilt through a
/// union with the empty set, which re-nodes every ring.
pub fn repair(geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>, RepairError> {
    if geometry
        .coords_iter()
        .any(|coord| !coord.x.is_finite() || !coord.y.is_finite())
    {
        return Err(RepairError::NonFiniteCoordinate);
    }
    if geometry.is_valid() {
        return Ok(geometry.clone());
    }

    let empty = MultiPolygon::<f64>::new(Vec::new());
    let rebuilt = catch_unwind(AssertUnwindSafe(|| geometry.union(&empty)))
        .map_err(|_| RepairError::Unrepairable("boolean union aborted".to_string()))?;
    if rebuilt.is_valid() {
        Ok(rebuilt)
    } else {
        Err(RepairError::Unrepairable(
            "self-union is still invalid".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{repair, RepairError};
    use geo::{polygon, Area, MultiPolygon, Validation};

    #[test]
    fn valid_geometry_is_returned_unchanged() {
        let square: MultiPolygon<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)]
                .into();
        assert_eq!(repair(&square), Ok(square));
    }

    #[test]
    fn bow_tie_is_rebuilt_into_valid_geometry() {
        let bow_tie: MultiPolygon<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0), (x: 2.0, y: 0.0), (x: 0.0, y: 2.0)]
                .into();
        assert!(!bow_tie.is_valid());

        let repaired = repair(&bow_tie).expect("bow-tie is repairable");
        assert!(repaired.is_valid());
        assert!((repaired.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let broken: MultiPolygon<f64> =
            polygon![(x: 0.0, y: 0.0), (x: f64::NAN, y: 0.0), (x: 1.0, y: 1.0)].into();
        assert_eq!(repair(&broken), Err(RepairError::NonFiniteCoordinate));
    }
}
