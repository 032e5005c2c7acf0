#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point-of-interest records and the category hierarchy data model.
//!
//! Every place provider (bulk open-places export, city API, etc.) normalizes
//! its rows into [`PointOfInterest`] before any spatial analysis runs. The
//! category taxonomy is carried as up to six optional hierarchy level names
//! plus the leaf category's flat name and label, mirroring the provider
//! schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category names for one point, across the taxonomy hierarchy.
///
/// Providers populate as many levels as their taxonomy carries; any level may
/// be absent. `name` and `label` describe the leaf category itself (the label
/// is the full `"Level1 > Level2 > Leaf"` breadcrumb in the source data).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLevels {
    /// Leaf category name (e.g., "BBQ Joint").
    pub name: Option<String>,
    /// Full category breadcrumb label.
    pub label: Option<String>,
    /// Level 1 category family (e.g., "Dining and Drinking").
    pub level1: Option<String>,
    /// Level 2 category name.
    pub level2: Option<String>,
    /// Level 3 category name.
    pub level3: Option<String>,
    /// Level 4 category name.
    pub level4: Option<String>,
    /// Level 5 category name.
    pub level5: Option<String>,
    /// Level 6 category name.
    pub level6: Option<String>,
}

impl CategoryLevels {
    /// Yields every populated category field, leaf name and label first,
    /// then levels 1 through 6 in order.
    ///
    /// Blank (empty or whitespace-only) fields are treated as absent; a
    /// provider exporting `""` for a missing level must not count as a
    /// category match downstream.
    pub fn populated_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.name.as_deref(),
            self.label.as_deref(),
            self.level1.as_deref(),
            self.level2.as_deref(),
            self.level3.as_deref(),
            self.level4.as_deref(),
            self.level5.as_deref(),
            self.level6.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|field| !field.trim().is_empty())
    }

    /// Returns `true` if no category field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated_fields().next().is_none()
    }
}

/// A place record normalized to the canonical schema.
///
/// Coordinates are optional — points without precise lat/lng can still be
/// stored, but they are excluded from all spatial aggregation, as are points
/// with a closure date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Original place ID from the data source.
    pub id: String,
    /// Business name (e.g., "Blue Ribbon BBQ").
    pub name: String,
    /// Latitude (WGS84). `None` if the source lacks coordinates.
    pub latitude: Option<f64>,
    /// Longitude (WGS84). `None` if the source lacks coordinates.
    pub longitude: Option<f64>,
    /// City/town the place is in.
    pub locality: Option<String>,
    /// State/province/region abbreviation.
    pub region: Option<String>,
    /// Category hierarchy names for this place.
    pub categories: CategoryLevels,
    /// When the business closed. `None` while it remains open.
    pub date_closed: Option<NaiveDate>,
}

impl PointOfInterest {
    /// Returns `true` if the business has no recorded closure date.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.date_closed.is_none()
    }

    /// Returns `(latitude, longitude)` when both components are present.
    #[must_use]
    pub const fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Returns `true` if this point is eligible for spatial aggregation:
    /// open and with a full coordinate pair.
    #[must_use]
    pub const fn is_mappable(&self) -> bool {
        self.is_open() && self.coordinate().is_some()
    }
}
