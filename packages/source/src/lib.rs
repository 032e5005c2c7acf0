#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV place-data source with bounding box and open-status prefiltering.
//!
//! Reads a bulk places export (Foursquare-style open places schema) and
//! yields normalized [`PointOfInterest`] records, applying the upstream
//! filters the analysis engine assumes: locality substring, geographic
//! bounding box, and "currently open" status.
//!
//! Row-level problems (unparseable numeric field, bad date) skip the row
//! with a warning; they never fail the whole load.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use gap_map_poi_models::{CategoryLevels, PointOfInterest};
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading place data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error opening or reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV stream itself is unreadable (not a row-level parse problem).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Geographic bounding box in degrees, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Returns `true` if the coordinate lies inside this box.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

/// Upstream filter applied while loading places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFilter {
    /// Keep only places whose locality contains this substring
    /// (case-insensitive), e.g. "boston".
    pub locality: Option<String>,
    /// Keep only places inside this bounding box.
    pub bbox: Option<BoundingBox>,
    /// Keep only places without a closure date.
    pub open_only: bool,
}

impl PlaceFilter {
    fn keep(&self, point: &PointOfInterest) -> bool {
        if self.open_only && !point.is_open() {
            return false;
        }

        if let Some(wanted) = &self.locality {
            let matched = point.locality.as_deref().is_some_and(|locality| {
                locality.to_ascii_lowercase().contains(&wanted.to_ascii_lowercase())
            });
            if !matched {
                return false;
            }
        }

        if let Some(bbox) = &self.bbox {
            let Some((lat, lng)) = point.coordinate() else {
                return false;
            };
            if !bbox.contains(lat, lng) {
                return false;
            }
        }

        true
    }
}

/// One raw row of the places CSV export.
#[derive(Debug, Deserialize)]
struct PlaceRow {
    /// Source place ID.
    id: String,
    /// Business name.
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    locality: Option<String>,
    region: Option<String>,
    /// Closure date in `YYYY-MM-DD`, empty while open.
    date_closed: Option<String>,
    category_name: Option<String>,
    category_label: Option<String>,
    level1_category_name: Option<String>,
    level2_category_name: Option<String>,
    level3_category_name: Option<String>,
    level4_category_name: Option<String>,
    level5_category_name: Option<String>,
    level6_category_name: Option<String>,
}

impl PlaceRow {
    /// Converts the raw row; `None` when the closure date is present but
    /// unparseable (the row is dropped with a warning).
    fn normalize(self) -> Option<PointOfInterest> {
        let date_closed = match self.date_closed.as_deref().filter(|d| !d.trim().is_empty()) {
            None => None,
            Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(err) => {
                    log::warn!("place {}: bad date_closed {raw:?} ({err}), row skipped", self.id);
                    return None;
                }
            },
        };

        Some(PointOfInterest {
            id: self.id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            locality: self.locality,
            region: self.region,
            categories: CategoryLevels {
                name: self.category_name,
                label: self.category_label,
                level1: self.level1_category_name,
                level2: self.level2_category_name,
                level3: self.level3_category_name,
                level4: self.level4_category_name,
                level5: self.level5_category_name,
                level6: self.level6_category_name,
            },
            date_closed,
        })
    }
}

/// Reads places from any CSV stream, applying the filter.
///
/// Rows that fail to parse are skipped with a warning, matching the
/// best-effort ingestion policy.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] only when the stream itself is unreadable.
pub fn read_places(
    reader: impl Read,
    filter: &PlaceFilter,
) -> Result<Vec<PointOfInterest>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut places = Vec::new();
    let mut skipped: u64 = 0;

    for (row_number, row) in csv_reader.deserialize::<PlaceRow>().enumerate() {
        match row {
            Ok(row) => {
                if let Some(point) = row.normalize() {
                    if filter.keep(&point) {
                        places.push(point);
                    }
                } else {
                    skipped += 1;
                }
            }
            Err(err) => {
                log::warn!("row {}: {err}, row skipped", row_number + 1);
                skipped += 1;
            }
        }
    }

    log::info!("Loaded {} places ({skipped} rows skipped)", places.len());
    Ok(places)
}

/// Loads places from a CSV file on disk, applying the filter.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file can't be opened, or
/// [`SourceError::Csv`] if the stream is unreadable.
pub fn load_places_csv(
    path: &Path,
    filter: &PlaceFilter,
) -> Result<Vec<PointOfInterest>, SourceError> {
    log::info!("Loading places from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_places(file, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,latitude,longitude,locality,region,date_closed,category_name,category_label,level1_category_name,level2_category_name,level3_category_name,level4_category_name,level5_category_name,level6_category_name";

    fn csv_of(rows: &[&str]) -> Vec<u8> {
        let mut data = HEADER.to_string();
        for row in rows {
            data.push('\n');
            data.push_str(row);
        }
        data.into_bytes()
    }

    #[test]
    fn parses_rows_into_points() {
        let data = csv_of(&[
            "p1,Joe's BBQ,42.36,-71.06,Boston,MA,,BBQ Joint,Dining and Drinking > Restaurant > BBQ Joint,Dining and Drinking,Restaurant,BBQ Joint,,,",
        ]);

        let places = read_places(&data[..], &PlaceFilter::default()).unwrap();
        assert_eq!(places.len(), 1);

        let place = &places[0];
        assert_eq!(place.name, "Joe's BBQ");
        assert_eq!(place.coordinate(), Some((42.36, -71.06)));
        assert_eq!(place.categories.level1.as_deref(), Some("Dining and Drinking"));
        assert_eq!(place.categories.level3.as_deref(), Some("BBQ Joint"));
        assert!(place.is_open());
    }

    #[test]
    fn open_only_drops_closed_places() {
        let data = csv_of(&[
            "p1,Open Diner,42.36,-71.06,Boston,MA,,Diner,,Dining and Drinking,,,,,",
            "p2,Closed Diner,42.36,-71.06,Boston,MA,2021-07-15,Diner,,Dining and Drinking,,,,,",
        ]);

        let filter = PlaceFilter {
            open_only: true,
            ..PlaceFilter::default()
        };
        let places = read_places(&data[..], &filter).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "p1");

        // Without the filter the closed place comes through with its date.
        let all = read_places(&csv_of(&[
            "p2,Closed Diner,42.36,-71.06,Boston,MA,2021-07-15,Diner,,Dining and Drinking,,,,,",
        ])[..], &PlaceFilter::default())
        .unwrap();
        assert_eq!(
            all[0].date_closed,
            NaiveDate::from_ymd_opt(2021, 7, 15)
        );
    }

    #[test]
    fn locality_filter_is_case_insensitive_substring() {
        let data = csv_of(&[
            "p1,A,42.36,-71.06,Boston,MA,,,,,,,,,",
            "p2,B,42.36,-71.06,South Boston,MA,,,,,,,,,",
            "p3,C,42.36,-71.06,Cambridge,MA,,,,,,,,,",
            "p4,D,42.36,-71.06,,,,,,,,,,,",
        ]);

        let filter = PlaceFilter {
            locality: Some("boston".to_string()),
            ..PlaceFilter::default()
        };
        let places = read_places(&data[..], &filter).unwrap();
        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn bbox_filter_excludes_outside_and_coordinate_less_points() {
        let data = csv_of(&[
            "p1,Inside,42.30,-71.05,Boston,MA,,,,,,,,,",
            "p2,North,43.50,-71.05,Boston,MA,,,,,,,,,",
            "p3,NoCoords,,,Boston,MA,,,,,,,,,",
        ]);

        let filter = PlaceFilter {
            bbox: Some(BoundingBox {
                min_lat: 42.2279,
                max_lat: 42.3975,
                min_lng: -71.1912,
                max_lng: -70.8085,
            }),
            ..PlaceFilter::default()
        };
        let places = read_places(&data[..], &filter).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "p1");
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let data = csv_of(&[
            "p1,Good,42.36,-71.06,Boston,MA,,,,,,,,,",
            "p2,BadLat,not-a-number,-71.06,Boston,MA,,,,,,,,,",
            "p3,BadDate,42.36,-71.06,Boston,MA,15-07-2021,,,,,,,,",
        ]);

        let places = read_places(&data[..], &PlaceFilter::default()).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "p1");
    }
}
