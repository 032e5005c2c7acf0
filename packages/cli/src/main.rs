#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line driver for opportunity gap analysis over a places CSV.
//!
//! Loads a bulk places export, classifies each place against a baseline
//! category family and a target category, aggregates per-hexcell counts,
//! and prints the top gap cells (high baseline demand, zero target
//! presence). Optionally writes the result as `GeoJSON` for a map renderer.
//!
//! Example (the Boston barbecue run this tool grew out of):
//!
//! ```text
//! gap_map_cli places.csv --locality boston \
//!     --bbox 42.2279,-71.1912,42.3975,-70.8085 --resolution 9 --top 3 \
//!     --output gaps.geojson
//! ```

use std::path::PathBuf;
use std::str::FromStr as _;

use clap::Parser;
use gap_map_analytics_models::{DEFAULT_RESOLUTION, DEFAULT_TOP_K, OpportunityParams};
use gap_map_export::{ExportLayers, TargetPlace};
use gap_map_source::{BoundingBox, PlaceFilter};
use gap_map_taxonomy::{BaselineSpec, TargetSpec, classify};

#[derive(Parser)]
#[command(name = "gap_map_cli", about = "Find underserved cells for a target business category")]
struct Cli {
    /// Path to the places CSV export.
    places_csv: PathBuf,

    /// Keep only places whose locality contains this substring (e.g. "boston").
    #[arg(long)]
    locality: Option<String>,

    /// Bounding box as "`min_lat,min_lng,max_lat,max_lng`".
    #[arg(long, value_parser = parse_bbox)]
    bbox: Option<BoundingBox>,

    /// Include places that have a closure date.
    #[arg(long)]
    include_closed: bool,

    /// H3 resolution to aggregate at (0-15).
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: u8,

    /// Number of gap cells to report.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top: usize,

    /// Baseline category family (level-1 name).
    #[arg(long, default_value = gap_map_taxonomy::DEFAULT_BASELINE_FAMILY)]
    baseline_family: String,

    /// Target category keyword matched against all category levels.
    #[arg(long, default_value = gap_map_taxonomy::DEFAULT_TARGET_KEYWORD)]
    target_keyword: String,

    /// Comma-separated name keywords overriding the built-in target list.
    #[arg(long)]
    name_keywords: Option<String>,

    /// Count target matches even outside the baseline family.
    #[arg(long)]
    allow_target_outside_baseline: bool,

    /// Fail the run on out-of-range coordinates instead of excluding them.
    #[arg(long)]
    strict: bool,

    /// Write results as GeoJSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Layers to export: "gaps", "heat", "target", or "all".
    #[arg(long, default_value = "all")]
    layers: String,
}

fn parse_bbox(raw: &str) -> Result<BoundingBox, String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|err| format!("bad bounding box component: {err}"))?;

    let [min_lat, min_lng, max_lat, max_lng] = parts[..] else {
        return Err("expected min_lat,min_lng,max_lat,max_lng".to_string());
    };

    if min_lat > max_lat || min_lng > max_lng {
        return Err("bounding box edges are inverted".to_string());
    }

    Ok(BoundingBox {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let layers = ExportLayers::from_str(&cli.layers)
        .map_err(|_| format!("unknown layers value {:?} (gaps, heat, target, all)", cli.layers))?;

    let filter = PlaceFilter {
        locality: cli.locality.clone(),
        bbox: cli.bbox,
        open_only: !cli.include_closed,
    };
    let points = gap_map_source::load_places_csv(&cli.places_csv, &filter)?;

    let mut target = TargetSpec {
        category_keyword: cli.target_keyword.clone(),
        requires_baseline: !cli.allow_target_outside_baseline,
        ..TargetSpec::default()
    };
    if let Some(keywords) = &cli.name_keywords {
        target.name_keywords = keywords
            .split(',')
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();
    }

    let params = OpportunityParams {
        resolution: cli.resolution,
        top_k: cli.top,
        strict: cli.strict,
        baseline: BaselineSpec {
            level1_family: cli.baseline_family.clone(),
        },
        target,
    };

    log::info!(
        "Analyzing {} places (baseline {:?}, target {:?})",
        points.len(),
        params.baseline.level1_family,
        params.target.category_keyword,
    );

    let report = gap_map_analytics::find_opportunities(&points, &params)?;

    println!(
        "{} baseline / {} target points across {} cells",
        report.baseline_total(),
        report.target_total(),
        report.aggregate.len(),
    );

    if report.gaps.is_empty() {
        println!("No gap cells found.");
    } else {
        println!("Top {} gap cells (baseline demand, no target presence):", report.gaps.len());
        for (rank, gap) in report.gaps.iter().enumerate() {
            println!(
                "  {}. cell {:x} at ({:.5}, {:.5}) - {} baseline places",
                rank + 1,
                gap.cell,
                gap.centroid.0,
                gap.centroid.1,
                gap.baseline_count,
            );
        }
    }

    if let Some(output) = &cli.output {
        // Heat layer wants every mappable baseline point, not just gap
        // cells; the target layer marks where the category already exists.
        let mut heat_points = Vec::new();
        let mut target_places = Vec::new();
        for point in points.iter().filter(|point| point.is_mappable()) {
            let Some(coordinate) = point.coordinate() else {
                continue;
            };
            let tagged = classify(point, &params.baseline, &params.target);
            if tagged.is_baseline {
                heat_points.push(coordinate);
            }
            if tagged.is_target {
                target_places.push(TargetPlace {
                    name: point.name.clone(),
                    coordinate,
                });
            }
        }

        let collection =
            gap_map_export::report_to_geojson(&report, &heat_points, &target_places, layers);
        gap_map_export::write_geojson(output, &collection)?;
    }

    Ok(())
}
