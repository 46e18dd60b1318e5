//! Resolution engine for convective outlook overlays.
//!
//! Overlapping severity regions are resolved into a partition where the more
//! severe label wins, and versioned overlays are indexed per calendar date so
//! one authoritative outlook can be selected for any instant.

pub mod geometry;
pub mod logging;
pub mod model;
pub mod parse;
pub mod service;
pub mod timeline;

pub use geometry::partition::{
    resolve_partition, resolve_regions, DropReason, DroppedRegion, Partition, PartitionOutcome,
    StyledRegion, AREA_EPSILON,
};
pub use geometry::repair::{repair, RepairError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::overlay::{
    Crs, OutlookValidity, Overlay, ResolvedOverlay, SourceOverlay, Versioned,
};
pub use model::region::Region;
pub use model::severity::{CatalogConfig, CatalogError, SeverityCatalog, SeverityLevel, UNRANKED};
pub use model::style::{LayerStyle, MapFrame};
pub use parse::identifier::{parse_identifier, IdentifierParseError};
pub use service::notification::NotificationPayload;
pub use service::outlook_service::{OutlookService, ResolveIssue, RunReport};
pub use timeline::date_index::{build_date_index, DateEntry, DateIndex};
pub use timeline::selection::{
    authoritative_overlay, detect_version_ties, select_authoritative, AuthoritativeSelection,
    VersionTie,
};
pub use timeline::summary::{calendar_summary, dominant_severity, CalendarDay, DaySummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
