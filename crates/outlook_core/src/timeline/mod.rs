//! Temporal version resolution.
//!
//! # Responsibility
//! - Index which overlays are valid on each calendar date.
//! - Select the authoritative (highest version) overlay for an instant.
//! - Summarize the dominant severity per date.
//!
//! # Invariants
//! - Pure batch computation over immutable overlays; rebuilt on every run.

pub mod date_index;
pub mod selection;
pub mod summary;
