//! Geometry overlap resolution.
//!
//! # Responsibility
//! - Repair invalid source geometry before any boolean operation.
//! - Resolve overlapping severity regions into a partition.
//!
//! # Invariants
//! - No operation here panics on degenerate input; failures are per-region.

pub mod partition;
pub mod repair;
