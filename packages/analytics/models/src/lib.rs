#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Opportunity analysis parameter and result types.
//!
//! Plain data shared between the analytics engine and its consumers (CLI,
//! exporters). Cells are carried in raw `u64` form here so results stay
//! serializable without pulling grid machinery into every consumer.

use std::collections::BTreeMap;

use gap_map_taxonomy::{BaselineSpec, TargetSpec};
use serde::{Deserialize, Serialize};

/// Default number of gap cells to return.
pub const DEFAULT_TOP_K: usize = 3;

/// Default H3 resolution for opportunity analysis (~200 m hexagons).
pub const DEFAULT_RESOLUTION: u8 = 9;

/// Per-cell baseline and target counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCounts {
    /// Number of points matching the baseline category family.
    pub baseline: u64,
    /// Number of points matching the target category.
    pub target: u64,
}

/// Aggregated counts per cell for one analysis run.
///
/// Keyed by the raw H3 cell index. `BTreeMap` keeps iteration (and therefore
/// ranking tie-breaks) deterministic across runs.
pub type CellAggregate = BTreeMap<u64, CellCounts>;

/// One ranked gap cell: nonzero baseline demand, zero target presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapCell {
    /// Raw H3 cell index.
    pub cell: u64,
    /// Cell center as `(lat, lng)` degrees.
    pub centroid: (f64, f64),
    /// Closed boundary ring of `(lat, lng)` vertices.
    pub boundary: Vec<(f64, f64)>,
    /// Baseline point count inside this cell.
    pub baseline_count: u64,
}

/// Configuration for one opportunity analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityParams {
    /// H3 resolution to aggregate at (0-15).
    pub resolution: u8,
    /// Maximum number of gap cells to return.
    pub top_k: usize,
    /// When set, an out-of-range coordinate fails the run instead of being
    /// excluded with a warning.
    pub strict: bool,
    /// Baseline category family predicate.
    pub baseline: BaselineSpec,
    /// Target category predicate.
    pub target: TargetSpec,
}

impl Default for OpportunityParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            top_k: DEFAULT_TOP_K,
            strict: false,
            baseline: BaselineSpec::default(),
            target: TargetSpec::default(),
        }
    }
}

/// Full output of one opportunity analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityReport {
    /// Per-cell counts the ranking was derived from.
    pub aggregate: CellAggregate,
    /// Top gap cells, descending by baseline count.
    pub gaps: Vec<GapCell>,
}

impl OpportunityReport {
    /// Total baseline points across all cells.
    #[must_use]
    pub fn baseline_total(&self) -> u64 {
        self.aggregate.values().map(|counts| counts.baseline).sum()
    }

    /// Total target points across all cells.
    #[must_use]
    pub fn target_total(&self) -> u64 {
        self.aggregate.values().map(|counts| counts.target).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_totals_sum_across_cells() {
        let mut aggregate = CellAggregate::new();
        aggregate.insert(
            1,
            CellCounts {
                baseline: 5,
                target: 1,
            },
        );
        aggregate.insert(
            2,
            CellCounts {
                baseline: 3,
                target: 0,
            },
        );

        let report = OpportunityReport {
            aggregate,
            gaps: vec![],
        };
        assert_eq!(report.baseline_total(), 8);
        assert_eq!(report.target_total(), 1);
    }

    #[test]
    fn default_params_match_documented_defaults() {
        let params = OpportunityParams::default();
        assert_eq!(params.resolution, 9);
        assert_eq!(params.top_k, 3);
        assert!(!params.strict);
        assert!(params.target.requires_baseline);
    }
}
