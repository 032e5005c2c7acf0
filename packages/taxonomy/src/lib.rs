#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Category taxonomy matching for baseline and target classification.
//!
//! Decides whether a [`PointOfInterest`] belongs to a broad baseline category
//! family (e.g., "Dining and Drinking") and/or a narrow target category
//! (e.g., barbecue). Target matching checks a category keyword against every
//! populated hierarchy level, and falls back to a configurable list of
//! target-indicative keywords matched against the business name.
//!
//! Classification is a pure function of the point and the two specs. It is
//! total: malformed (blank) category fields are treated as absent, never as
//! errors.

use gap_map_poi_models::PointOfInterest;
use serde::{Deserialize, Serialize};

/// Default baseline category family, matching the top level of the
/// Foursquare-style taxonomy.
pub const DEFAULT_BASELINE_FAMILY: &str = "Dining and Drinking";

/// Default category keyword for the barbecue target.
pub const DEFAULT_TARGET_KEYWORD: &str = "bbq";

/// Name keywords that indicate a barbecue business even when its category
/// data doesn't say so (e.g., "Smoky Pit Ribs" categorized only as
/// "Restaurant").
pub const BBQ_NAME_KEYWORDS: &[&str] = &[
    "barbecue",
    "barbeque",
    "smokehouse",
    "smoker",
    "smoked",
    "smoking",
    "pit",
    "ribs",
];

/// Predicate selecting the broad baseline category family.
///
/// A point is baseline when its level-1 category name equals the configured
/// family, case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSpec {
    /// Level-1 category family name (e.g., "Dining and Drinking").
    pub level1_family: String,
}

impl Default for BaselineSpec {
    fn default() -> Self {
        Self {
            level1_family: DEFAULT_BASELINE_FAMILY.to_string(),
        }
    }
}

impl BaselineSpec {
    /// Returns `true` if the point's level-1 category matches this family.
    #[must_use]
    pub fn matches(&self, point: &PointOfInterest) -> bool {
        point
            .categories
            .level1
            .as_deref()
            .is_some_and(|level1| level1.trim().eq_ignore_ascii_case(&self.level1_family))
    }
}

/// Predicate selecting the narrow target category.
///
/// A point is a target when the category keyword substring-matches any
/// populated category field, or any name keyword substring-matches the
/// business name. With `requires_baseline` set, target additionally requires
/// baseline membership (a barbecue-named hardware store stays out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    /// Keyword matched (case-insensitively) against every populated category
    /// field across all hierarchy levels.
    pub category_keyword: String,
    /// Keywords matched (case-insensitively) against the business name.
    pub name_keywords: Vec<String>,
    /// Whether target classification requires baseline membership.
    pub requires_baseline: bool,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            category_keyword: DEFAULT_TARGET_KEYWORD.to_string(),
            name_keywords: BBQ_NAME_KEYWORDS.iter().map(ToString::to_string).collect(),
            requires_baseline: true,
        }
    }
}

impl TargetSpec {
    /// Returns `true` if the point's categories or name match this target,
    /// ignoring the `requires_baseline` constraint (applied in
    /// [`classify`]).
    #[must_use]
    pub fn matches(&self, point: &PointOfInterest) -> bool {
        let category_hit = !self.category_keyword.is_empty()
            && point
                .categories
                .populated_fields()
                .any(|field| contains_ignore_case(field, &self.category_keyword));

        category_hit
            || self
                .name_keywords
                .iter()
                .any(|keyword| contains_ignore_case(&point.name, keyword))
    }
}

/// Derived classification of one point against a baseline and target spec.
///
/// Never persisted; computed freshly per analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Point belongs to the baseline category family.
    pub is_baseline: bool,
    /// Point matches the target category.
    pub is_target: bool,
}

impl Classification {
    /// Returns `true` if the point matched either predicate.
    #[must_use]
    pub const fn is_relevant(self) -> bool {
        self.is_baseline || self.is_target
    }
}

/// Classifies one point against the baseline and target specs.
///
/// Total over well-formed inputs: absent or blank category fields are
/// non-matching, never errors. Blank-but-present fields are logged at debug
/// as recoverable anomalies.
#[must_use]
pub fn classify(
    point: &PointOfInterest,
    baseline: &BaselineSpec,
    target: &TargetSpec,
) -> Classification {
    if has_blank_category_field(point) {
        log::debug!(
            "point {}: blank category field treated as absent",
            point.id
        );
    }

    let is_baseline = baseline.matches(point);
    let target_hit = target.matches(point);
    let is_target = if target.requires_baseline {
        target_hit && is_baseline
    } else {
        target_hit
    };

    Classification {
        is_baseline,
        is_target,
    }
}

/// Case-insensitive (ASCII) substring search.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn has_blank_category_field(point: &PointOfInterest) -> bool {
    let levels = &point.categories;
    [
        &levels.name,
        &levels.label,
        &levels.level1,
        &levels.level2,
        &levels.level3,
        &levels.level4,
        &levels.level5,
        &levels.level6,
    ]
    .into_iter()
    .any(|field| field.as_deref().is_some_and(|f| f.trim().is_empty()))
}
