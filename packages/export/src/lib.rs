#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `GeoJSON` export of opportunity analysis results for map renderers.
//!
//! Turns an [`OpportunityReport`] into a `FeatureCollection` a renderer can
//! draw directly: one polygon and one centroid point per gap cell, a point
//! layer of raw baseline coordinates for a heat overlay, and a marker layer
//! for the places where the target category already exists. Rendering
//! semantics (colors, intensity curves) stay with the renderer; this crate
//! only fixes the exchange shape.
//!
//! `GeoJSON` positions are `(lng, lat)` per RFC 7946; the flip from the
//! system-wide `(lat, lng)` convention happens here at the boundary.

use std::path::Path;

use gap_map_analytics_models::{GapCell, OpportunityReport};
use geo::{LineString, Point, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while exporting results.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which layers to include in the exported collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExportLayers {
    /// Gap polygons and centroids only.
    Gaps,
    /// Baseline heat points only.
    Heat,
    /// Existing target-category place markers only.
    Target,
    /// Everything.
    All,
}

impl ExportLayers {
    const fn include_gaps(self) -> bool {
        matches!(self, Self::Gaps | Self::All)
    }

    const fn include_heat(self) -> bool {
        matches!(self, Self::Heat | Self::All)
    }

    const fn include_target(self) -> bool {
        matches!(self, Self::Target | Self::All)
    }
}

/// A place that already matches the target category, for the marker layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPlace {
    /// Business name (rendered as the marker popup).
    pub name: String,
    /// Location as `(lat, lng)` degrees.
    pub coordinate: (f64, f64),
}

/// Builds a `GeoJSON` `FeatureCollection` from an analysis report.
///
/// `heat_points` are raw `(lat, lng)` baseline coordinates for the heat
/// layer; `target_places` are the existing target-category businesses for
/// the marker layer. Pass empty slices for layers not being exported.
#[must_use]
pub fn report_to_geojson(
    report: &OpportunityReport,
    heat_points: &[(f64, f64)],
    target_places: &[TargetPlace],
    layers: ExportLayers,
) -> FeatureCollection {
    let mut features = Vec::new();

    if layers.include_gaps() {
        for (rank, gap) in report.gaps.iter().enumerate() {
            features.push(gap_polygon_feature(gap, rank));
            features.push(gap_centroid_feature(gap, rank));
        }
    }

    if layers.include_heat() {
        for &(lat, lng) in heat_points {
            let point = Point::new(lng, lat);
            features.push(Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties(&[("layer", "heat".into())])),
                foreign_members: None,
            });
        }
    }

    if layers.include_target() {
        for place in target_places {
            let (lat, lng) = place.coordinate;
            let point = Point::new(lng, lat);
            features.push(Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties(&[
                    ("layer", "target".into()),
                    ("name", place.name.clone().into()),
                ])),
                foreign_members: None,
            });
        }
    }

    log::debug!("Exported {} GeoJSON features", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serializes the collection to a pretty-printed `GeoJSON` file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file can't be created, or
/// [`ExportError::Json`] if serialization fails.
pub fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, collection)?;
    log::info!("Wrote GeoJSON to {}", path.display());
    Ok(())
}

fn gap_polygon_feature(gap: &GapCell, rank: usize) -> Feature {
    // Boundary arrives as (lat, lng); GeoJSON wants (lng, lat).
    let ring: Vec<(f64, f64)> = gap.boundary.iter().map(|&(lat, lng)| (lng, lat)).collect();
    let polygon = Polygon::new(LineString::from(ring), vec![]);

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&polygon))),
        id: None,
        properties: Some(gap_properties(gap, rank, "gap_polygon")),
        foreign_members: None,
    }
}

fn gap_centroid_feature(gap: &GapCell, rank: usize) -> Feature {
    let (lat, lng) = gap.centroid;
    let point = Point::new(lng, lat);

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
        id: None,
        properties: Some(gap_properties(gap, rank, "gap_centroid")),
        foreign_members: None,
    }
}

fn gap_properties(gap: &GapCell, rank: usize, layer: &str) -> JsonObject {
    properties(&[
        ("layer", layer.into()),
        // H3 indices are conventionally exchanged in hex form.
        ("cell", format!("{:x}", gap.cell).into()),
        ("rank", rank.into()),
        ("baselineCount", gap.baseline_count.into()),
    ])
}

fn properties(entries: &[(&str, serde_json::Value)]) -> JsonObject {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}
