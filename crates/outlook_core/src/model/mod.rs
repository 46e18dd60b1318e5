//! Domain model for outlook overlays.
//!
//! # Responsibility
//! - Define regions, overlays and their validity windows.
//! - Hold the injected severity catalog and renderer style data.
//!
//! # Invariants
//! - Model values are immutable once built; resolvers derive new values.
//! - Every overlay geometry is WGS84 lon/lat.

pub mod overlay;
pub mod region;
pub mod severity;
pub mod style;
