//! Gap ranking: cells with baseline demand but no target presence.

use gap_map_analytics_models::CellAggregate;

/// Selects and ranks gap cells from an aggregate.
///
/// A gap cell has `baseline > 0` and `target == 0`. Results are ordered
/// descending by baseline count; equal counts break ties by ascending cell
/// index so output is reproducible across runs. At most `k` entries are
/// returned; fewer (or none) when fewer cells qualify, which is not an
/// error.
#[must_use]
pub fn rank(aggregate: &CellAggregate, k: usize) -> Vec<(u64, u64)> {
    let mut gaps: Vec<(u64, u64)> = aggregate
        .iter()
        .filter(|(_, counts)| counts.baseline > 0 && counts.target == 0)
        .map(|(&cell, counts)| (cell, counts.baseline))
        .collect();

    gaps.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    gaps.truncate(k);
    gaps
}

#[cfg(test)]
mod tests {
    use gap_map_analytics_models::CellCounts;

    use super::*;

    fn aggregate_of(entries: &[(u64, u64, u64)]) -> CellAggregate {
        entries
            .iter()
            .map(|&(cell, baseline, target)| (cell, CellCounts { baseline, target }))
            .collect()
    }

    #[test]
    fn ranks_gap_cells_by_descending_baseline() {
        // A(baseline=5,target=0), B(baseline=3,target=1), C(baseline=7,target=0)
        let aggregate = aggregate_of(&[(1, 5, 0), (2, 3, 1), (3, 7, 0)]);

        let ranked = rank(&aggregate, 2);
        assert_eq!(ranked, vec![(3, 7), (1, 5)]);
    }

    #[test]
    fn gap_predicate_holds_for_every_result() {
        let aggregate = aggregate_of(&[(1, 5, 0), (2, 0, 0), (3, 2, 2), (4, 9, 0), (5, 1, 0)]);

        for (cell, baseline_count) in rank(&aggregate, 10) {
            let counts = &aggregate[&cell];
            assert!(counts.baseline > 0);
            assert_eq!(counts.target, 0);
            assert_eq!(counts.baseline, baseline_count);
        }
    }

    #[test]
    fn ranking_is_monotonic() {
        let aggregate = aggregate_of(&[(1, 4, 0), (2, 8, 0), (3, 1, 0), (4, 6, 0)]);
        let ranked = rank(&aggregate, 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn equal_counts_break_ties_by_ascending_cell_index() {
        let aggregate = aggregate_of(&[(30, 5, 0), (10, 5, 0), (20, 5, 0)]);
        let ranked = rank(&aggregate, 3);
        assert_eq!(ranked, vec![(10, 5), (20, 5), (30, 5)]);
    }

    #[test]
    fn respects_top_k_bound() {
        let aggregate = aggregate_of(&[(1, 5, 0), (2, 4, 0), (3, 3, 0)]);
        assert_eq!(rank(&aggregate, 2).len(), 2);
        assert_eq!(rank(&aggregate, 5).len(), 3);
        assert!(rank(&aggregate, 0).is_empty());
    }

    #[test]
    fn empty_aggregate_yields_empty_result() {
        assert!(rank(&CellAggregate::new(), 3).is_empty());
    }

    #[test]
    fn cells_with_zero_baseline_never_qualify() {
        let aggregate = aggregate_of(&[(1, 0, 0), (2, 0, 3)]);
        assert!(rank(&aggregate, 3).is_empty());
    }
}
