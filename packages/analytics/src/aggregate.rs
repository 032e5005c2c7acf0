//! Density aggregation: classified points bucketed into per-cell counts.

use gap_map_analytics_models::CellAggregate;
use gap_map_hexgrid::HexGridError;
use gap_map_poi_models::PointOfInterest;
use gap_map_taxonomy::{BaselineSpec, TargetSpec, classify};
use h3o::Resolution;

use crate::AnalyticsError;

/// Aggregates points into per-cell baseline and target counts.
///
/// Points that are closed or missing coordinates are skipped per the data
/// model invariant. A point classified as both baseline and target
/// increments both counters of its cell. Iteration order of the input is
/// irrelevant; the result is deterministic for a given point set.
///
/// # Errors
///
/// Returns [`AnalyticsError::HexGrid`] for an out-of-range coordinate when
/// `strict` is set. In lenient mode such points are excluded with a warning.
pub fn aggregate(
    points: &[PointOfInterest],
    resolution: Resolution,
    baseline: &BaselineSpec,
    target: &TargetSpec,
    strict: bool,
) -> Result<CellAggregate, AnalyticsError> {
    let mut cells = CellAggregate::new();
    let mut skipped_unmappable: u64 = 0;
    let mut skipped_coordinate: u64 = 0;

    for point in points {
        let Some((lat, lng)) = point.coordinate().filter(|_| point.is_open()) else {
            skipped_unmappable += 1;
            continue;
        };

        let tagged = classify(point, baseline, target);
        if !tagged.is_relevant() {
            continue;
        }

        let cell = match gap_map_hexgrid::point_to_cell(lat, lng, resolution) {
            Ok(cell) => cell,
            Err(err @ HexGridError::InvalidCoordinate(_)) => {
                if strict {
                    return Err(err.into());
                }
                log::warn!("point {}: {err}, excluded from aggregation", point.id);
                skipped_coordinate += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let counts = cells.entry(cell.into()).or_default();
        if tagged.is_baseline {
            counts.baseline += 1;
        }
        if tagged.is_target {
            counts.target += 1;
        }
    }

    log::info!(
        "Aggregated {} points into {} cells at resolution {} \
         ({skipped_unmappable} unmappable, {skipped_coordinate} bad coordinates)",
        points.len(),
        cells.len(),
        u8::from(resolution),
    );

    Ok(cells)
}
