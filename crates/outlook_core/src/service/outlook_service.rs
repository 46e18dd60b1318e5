//! Outlook ingest use-case service.
//!
//! # Responsibility
//! - Parse loader output into versioned overlays.
//! - Resolve each overlay's partition and collect non-fatal issues.
//! - Answer timeline queries over the resolved run.
//!
//! # Invariants
//! - No single overlay or region can fail the whole run.
//! - Resolved overlays keep loader input order.

use crate::geometry::partition::{resolve_partition, DropReason};
use crate::geometry::repair::RepairError;
use crate::model::overlay::{Overlay, ResolvedOverlay, SourceOverlay};
use crate::model::severity::SeverityCatalog;
use crate::parse::identifier::IdentifierParseError;
use crate::timeline::date_index::{build_date_index, DateIndex};
use crate::timeline::selection::{
    detect_version_ties, select_authoritative, AuthoritativeSelection, VersionTie,
};
use crate::timeline::summary::{calendar_summary, dominant_severity, CalendarDay, DaySummary};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// Non-fatal problem surfaced to the caller after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// Identifier does not match the outlook grammar; overlay skipped.
    ParseFailure {
        identifier: String,
        error: IdentifierParseError,
    },
    /// Region geometry could not be made valid; region dropped.
    GeometryRepairFailure {
        identifier: String,
        label: String,
        error: RepairError,
    },
    /// Overlays share an instant with the same version.
    AmbiguousVersionTie(VersionTie),
}

impl Display for ResolveIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseFailure { identifier, error } => {
                write!(f, "skipped `{identifier}`: {error}")
            }
            Self::GeometryRepairFailure {
                identifier,
                label,
                error,
            } => write!(f, "dropped `{label}` from `{identifier}`: {error}"),
            Self::AmbiguousVersionTie(tie) => write!(
                f,
                "version {} claimed by {} overlays at {}: {}",
                tie.version,
                tie.identifiers.len(),
                tie.instant,
                tie.identifiers.join(", ")
            ),
        }
    }
}

/// Outcome of one ingest run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Successfully parsed overlays with their partitions, in input order.
    pub overlays: Vec<ResolvedOverlay>,
    pub issues: Vec<ResolveIssue>,
    /// Regions removed because higher tiers claimed their whole area.
    pub clipped_away: usize,
}

impl RunReport {
    /// Number of overlays skipped for unparsable identifiers.
    pub fn skipped_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ResolveIssue::ParseFailure { .. }))
            .count()
    }

    /// Number of regions dropped for unrepairable geometry.
    pub fn repair_failure_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ResolveIssue::GeometryRepairFailure { .. }))
            .count()
    }

    pub fn ties(&self) -> impl Iterator<Item = &VersionTie> {
        self.issues.iter().filter_map(|issue| match issue {
            ResolveIssue::AmbiguousVersionTie(tie) => Some(tie),
            _ => None,
        })
    }

    pub fn date_index(&self) -> DateIndex {
        build_date_index(&self.overlays)
    }
}

/// Use-case facade over the injected severity catalog.
#[derive(Debug, Clone, Default)]
pub struct OutlookService {
    catalog: SeverityCatalog,
}

impl OutlookService {
    pub fn new(catalog: SeverityCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SeverityCatalog {
        &self.catalog
    }

    /// Parses, resolves and cross-checks every loader overlay.
    pub fn ingest(&self, sources: Vec<SourceOverlay>) -> RunReport {
        let mut report = RunReport::default();
        let total = sources.len();

        for source in sources {
            let identifier = source.identifier.clone();
            let overlay = match Overlay::from_source(source) {
                Ok(overlay) => overlay,
                Err(error) => {
                    warn!(
                        "event=identifier_skipped module=ingest status=warn identifier={} error={}",
                        identifier, error
                    );
                    report
                        .issues
                        .push(ResolveIssue::ParseFailure { identifier, error });
                    continue;
                }
            };

            let outcome = resolve_partition(&overlay, &self.catalog);
            for dropped in outcome.dropped {
                match dropped.reason {
                    DropReason::RepairFailed(error) => {
                        report.issues.push(ResolveIssue::GeometryRepairFailure {
                            identifier: identifier.clone(),
                            label: dropped.label,
                            error,
                        })
                    }
                    DropReason::EmptyAfterClipping => report.clipped_away += 1,
                }
            }
            report.overlays.push(ResolvedOverlay {
                overlay,
                partition: outcome.partition,
            });
        }

        for tie in detect_version_ties(&report.overlays) {
            warn!(
                "event=version_tie module=ingest status=warn version={} first={} instant={}",
                tie.version, tie.identifiers[0], tie.instant
            );
            report.issues.push(ResolveIssue::AmbiguousVersionTie(tie));
        }

        info!(
            "event=ingest_done module=ingest status=ok total={} resolved={} skipped={} repair_failures={} clipped_away={}",
            total,
            report.overlays.len(),
            report.skipped_count(),
            report.repair_failure_count(),
            report.clipped_away
        );
        report
    }

    /// Authoritative overlay of `report` at `instant`.
    pub fn authoritative<'a>(
        &self,
        report: &'a RunReport,
        instant: NaiveDateTime,
    ) -> AuthoritativeSelection<'a, ResolvedOverlay> {
        select_authoritative(&report.overlays, instant)
    }

    pub fn dominant_severity(&self, index: &DateIndex, date: NaiveDate) -> DaySummary {
        dominant_severity(index, date, &self.catalog)
    }

    pub fn calendar(&self, index: &DateIndex) -> Vec<CalendarDay> {
        calendar_summary(index, &self.catalog)
    }
}
