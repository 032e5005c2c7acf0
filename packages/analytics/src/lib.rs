#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial density aggregation and opportunity gap ranking engine.
//!
//! Takes an in-memory snapshot of classified points, buckets them into H3
//! cells, and ranks the cells with baseline demand but no target presence.
//! Everything is synchronous and pure over the snapshot; concurrent runs
//! over the same point set need no coordination because each run owns its
//! aggregate.
//!
//! Error policy: configuration problems (bad resolution) fail the run;
//! per-point problems (out-of-range coordinate) are excluded with a warning
//! unless the caller opts into strict mode.

pub mod aggregate;
pub mod opportunity;
pub mod rank;

pub use aggregate::aggregate;
pub use opportunity::find_opportunities;
pub use rank::rank;

use thiserror::Error;

/// Errors that can occur during an analysis run.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Hex grid indexing failed (invalid resolution, or an out-of-range
    /// coordinate in strict mode).
    #[error("Hex grid error: {0}")]
    HexGrid(#[from] gap_map_hexgrid::HexGridError),
}
