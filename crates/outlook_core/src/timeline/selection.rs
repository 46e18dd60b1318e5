//! Authoritative overlay selection.
//!
//! # Invariants
//! - Only overlays whose inclusive window contains the exact instant compete.
//! - The highest version wins; equal top versions are a reported tie resolved
//!   in favour of the first overlay in input order.

use crate::model::overlay::Versioned;
use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;

/// Two or more overlays claiming one instant with the same top version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionTie {
    pub instant: NaiveDateTime,
    pub version: u32,
    /// Tied identifiers in input order; the first one was selected.
    pub identifiers: Vec<String>,
}

/// Result of selecting the authoritative overlay for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoritativeSelection<'a, T> {
    /// `None` means no outlook was issued for this period.
    pub overlay: Option<&'a T>,
    pub tie: Option<VersionTie>,
}

impl<'a, T: Versioned> AuthoritativeSelection<'a, T> {
    pub fn identifier(&self) -> Option<&'a str> {
        self.overlay.map(|overlay| overlay.identifier())
    }
}

/// Picks the highest-version overlay valid at `instant`.
pub fn select_authoritative<T: Versioned>(
    overlays: &[T],
    instant: NaiveDateTime,
) -> AuthoritativeSelection<'_, T> {
    let candidates = overlays
        .iter()
        .filter(|overlay| overlay.validity().contains(instant))
        .collect::<Vec<_>>();

    let Some(top_version) = candidates
        .iter()
        .map(|overlay| overlay.validity().version)
        .max()
    else {
        return AuthoritativeSelection {
            overlay: None,
            tie: None,
        };
    };

    let winners = candidates
        .into_iter()
        .filter(|overlay| overlay.validity().version == top_version)
        .collect::<Vec<_>>();
    let tie = (winners.len() > 1).then(|| {
        let tie = VersionTie {
            instant,
            version: top_version,
            identifiers: winners
                .iter()
                .map(|overlay| overlay.identifier().to_string())
                .collect(),
        };
        warn!(
            "event=version_tie module=timeline status=warn instant={} version={} count={}",
            instant,
            top_version,
            tie.identifiers.len()
        );
        tie
    });

    AuthoritativeSelection {
        overlay: winners.first().copied(),
        tie,
    }
}

/// Identifier of the authoritative overlay at `instant`, if any.
pub fn authoritative_overlay<T: Versioned>(overlays: &[T], instant: NaiveDateTime) -> Option<&str> {
    select_authoritative(overlays, instant).identifier()
}

/// Finds every pair of overlays whose windows overlap with equal versions.
///
/// Each tie is reported at the first instant both windows share.
pub fn detect_version_ties<T: Versioned>(overlays: &[T]) -> Vec<VersionTie> {
    let mut ties = Vec::new();
    for (index, left) in overlays.iter().enumerate() {
        for right in &overlays[index + 1..] {
            let (a, b) = (left.validity(), right.validity());
            if a.version == b.version && a.overlaps(b) {
                ties.push(VersionTie {
                    instant: a.start.max(b.start),
                    version: a.version,
                    identifiers: vec![left.identifier().to_string(), right.identifier().to_string()],
                });
            }
        }
    }
    ties
}
