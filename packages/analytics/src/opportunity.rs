//! End-to-end opportunity analysis: aggregate, rank, resolve geometry.

use gap_map_analytics_models::{GapCell, OpportunityParams, OpportunityReport};
use gap_map_poi_models::PointOfInterest;

use crate::{AnalyticsError, aggregate, rank};

/// Runs a full opportunity analysis over an in-memory point snapshot.
///
/// Pipeline: validate resolution, aggregate per-cell counts, rank gap
/// cells, then resolve centroid and boundary geometry for the winners.
/// All-or-nothing for configuration errors; per-point data errors are
/// excluded (or fatal under `params.strict`).
///
/// # Errors
///
/// Returns [`AnalyticsError::HexGrid`] for an invalid resolution, or for an
/// out-of-range coordinate in strict mode.
pub fn find_opportunities(
    points: &[PointOfInterest],
    params: &OpportunityParams,
) -> Result<OpportunityReport, AnalyticsError> {
    let resolution = gap_map_hexgrid::parse_resolution(params.resolution)?;

    let cells = aggregate(
        points,
        resolution,
        &params.baseline,
        &params.target,
        params.strict,
    )?;
    let ranked = rank(&cells, params.top_k);

    // Ranked cells came out of the aggregator, so the raw indices are
    // always valid; a failure here is an integrity violation.
    let cells_to_resolve = ranked
        .iter()
        .map(|&(raw_cell, _)| gap_map_hexgrid::cell_from_raw(raw_cell))
        .collect::<Result<Vec<_>, _>>()?;

    let gaps = gap_map_hexgrid::resolve_geometry(&cells_to_resolve)
        .into_iter()
        .zip(&ranked)
        .map(|(geometry, &(raw_cell, baseline_count))| GapCell {
            cell: raw_cell,
            centroid: geometry.centroid,
            boundary: geometry.boundary,
            baseline_count,
        })
        .collect::<Vec<_>>();

    log::info!(
        "Opportunity analysis found {} gap cells (top {} requested)",
        gaps.len(),
        params.top_k,
    );

    Ok(OpportunityReport {
        aggregate: cells,
        gaps,
    })
}

#[cfg(test)]
mod tests {
    use gap_map_poi_models::CategoryLevels;

    use super::*;

    fn restaurant(id: &str, name: &str, lat: f64, lng: f64, leaf: &str) -> PointOfInterest {
        PointOfInterest {
            id: id.to_string(),
            name: name.to_string(),
            latitude: Some(lat),
            longitude: Some(lng),
            locality: Some("Boston".to_string()),
            region: Some("MA".to_string()),
            categories: CategoryLevels {
                name: Some(leaf.to_string()),
                level1: Some("Dining and Drinking".to_string()),
                ..CategoryLevels::default()
            },
            date_closed: None,
        }
    }

    // Two clusters far enough apart to land in different res-9 cells:
    // downtown has restaurants and a BBQ joint, the other only restaurants.
    fn sample_points() -> Vec<PointOfInterest> {
        vec![
            restaurant("d1", "Downtown Diner", 42.3601, -71.0589, "Diner"),
            restaurant("d2", "Downtown Cafe", 42.3601, -71.0589, "Cafe"),
            restaurant("d3", "Joe's BBQ", 42.3601, -71.0589, "BBQ Joint"),
            restaurant("s1", "Southside Diner", 42.3000, -71.1100, "Diner"),
            restaurant("s2", "Southside Cafe", 42.3000, -71.1100, "Cafe"),
            restaurant("s3", "Southside Grill", 42.3000, -71.1100, "Restaurant"),
        ]
    }

    #[test]
    fn gap_cells_exclude_cells_with_target_presence() {
        let report = find_opportunities(&sample_points(), &OpportunityParams::default()).unwrap();

        assert_eq!(report.aggregate.len(), 2);
        assert_eq!(report.gaps.len(), 1);

        let gap = &report.gaps[0];
        assert_eq!(gap.baseline_count, 3);

        let counts = &report.aggregate[&gap.cell];
        assert_eq!(counts.baseline, 3);
        assert_eq!(counts.target, 0);
    }

    #[test]
    fn gap_geometry_matches_the_cell() {
        let report = find_opportunities(&sample_points(), &OpportunityParams::default()).unwrap();
        let gap = &report.gaps[0];

        let cell = gap_map_hexgrid::cell_from_raw(gap.cell).unwrap();
        assert_eq!(gap.centroid, gap_map_hexgrid::cell_centroid(cell));
        assert_eq!(gap.boundary, gap_map_hexgrid::cell_boundary(cell));
        assert_eq!(gap.boundary.first(), gap.boundary.last());
    }

    #[test]
    fn invalid_resolution_fails_the_whole_run() {
        let params = OpportunityParams {
            resolution: 16,
            ..OpportunityParams::default()
        };
        assert!(matches!(
            find_opportunities(&sample_points(), &params),
            Err(AnalyticsError::HexGrid(_))
        ));
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let report = find_opportunities(&[], &OpportunityParams::default()).unwrap();
        assert!(report.aggregate.is_empty());
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn top_k_zero_returns_no_gaps() {
        let params = OpportunityParams {
            top_k: 0,
            ..OpportunityParams::default()
        };
        let report = find_opportunities(&sample_points(), &params).unwrap();
        assert!(report.gaps.is_empty());
        assert!(!report.aggregate.is_empty());
    }
}
