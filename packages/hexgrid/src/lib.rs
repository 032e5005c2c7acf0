#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! H3 hexagonal grid indexing and cell geometry resolution.
//!
//! Thin, typed wrapper over `h3o` that fixes the coordinate convention for
//! the rest of the system: everything here speaks `(latitude, longitude)`
//! pairs in degrees, in that order. Cell boundaries come back as closed
//! rings ready for direct renderer consumption.
//!
//! All functions are pure and deterministic; there is no hidden state.

use h3o::{CellIndex, LatLng, Resolution};
use thiserror::Error;

/// Errors from hex grid indexing.
#[derive(Debug, Error)]
pub enum HexGridError {
    /// Caller-supplied resolution outside the supported 0-15 range.
    #[error("Invalid H3 resolution: {0}")]
    InvalidResolution(#[from] h3o::error::InvalidResolution),

    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(#[from] h3o::error::InvalidLatLng),

    /// A raw 64-bit value that is not a valid H3 cell index.
    #[error("Invalid H3 cell index: {0}")]
    InvalidCellIndex(#[from] h3o::error::InvalidCellIndex),
}

/// Centroid and boundary geometry for one cell, in `(lat, lng)` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
    /// The cell this geometry belongs to.
    pub cell: CellIndex,
    /// Cell center.
    pub centroid: (f64, f64),
    /// Closed boundary ring (first vertex repeated at the end).
    pub boundary: Vec<(f64, f64)>,
}

/// Validates a raw resolution value against the supported 0-15 range.
///
/// # Errors
///
/// Returns [`HexGridError::InvalidResolution`] when out of range. This is a
/// configuration error; callers should fail the whole run on it.
pub fn parse_resolution(resolution: u8) -> Result<Resolution, HexGridError> {
    Ok(Resolution::try_from(resolution)?)
}

/// Maps a geographic point to its containing cell at the given resolution.
///
/// # Errors
///
/// Returns [`HexGridError::InvalidCoordinate`] when the latitude or
/// longitude is out of range.
pub fn point_to_cell(
    lat: f64,
    lng: f64,
    resolution: Resolution,
) -> Result<CellIndex, HexGridError> {
    let coord = LatLng::new(lat, lng)?;
    Ok(coord.to_cell(resolution))
}

/// Returns the cell's center as `(lat, lng)` degrees.
#[must_use]
pub fn cell_centroid(cell: CellIndex) -> (f64, f64) {
    let center = LatLng::from(cell);
    (center.lat(), center.lng())
}

/// Returns the cell's boundary as a closed ring of `(lat, lng)` vertices.
///
/// H3 vertex accessors are `(lng, lat)` shaped in most geometry pipelines;
/// the swap to `(lat, lng)` happens here, once, so downstream renderers can
/// consume vertices verbatim. The first vertex is repeated at the end to
/// close the ring.
#[must_use]
pub fn cell_boundary(cell: CellIndex) -> Vec<(f64, f64)> {
    let mut ring: Vec<(f64, f64)> = cell
        .boundary()
        .iter()
        .map(|vertex| (vertex.lat(), vertex.lng()))
        .collect();

    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

/// Reconstructs a [`CellIndex`] from its raw 64-bit form.
///
/// # Errors
///
/// Returns [`HexGridError::InvalidCellIndex`] for values that don't encode a
/// valid cell. Indices produced by [`point_to_cell`] always round-trip; a
/// failure here means the input came from an untrusted source.
pub fn cell_from_raw(raw: u64) -> Result<CellIndex, HexGridError> {
    Ok(CellIndex::try_from(raw)?)
}

/// Resolves centroid and boundary geometry for an ordered list of cells.
///
/// Order preserving: output index `i` describes `cells[i]`.
#[must_use]
pub fn resolve_geometry(cells: &[CellIndex]) -> Vec<CellGeometry> {
    cells
        .iter()
        .map(|&cell| CellGeometry {
            cell,
            centroid: cell_centroid(cell),
            boundary: cell_boundary(cell),
        })
        .collect()
}
