use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use image::{Rgb, RgbImage};
use sink_core::emissions::ActivityData;
use sink_core::services::{GapStatus, Snapshot, SnapshotProvider};
use sink_core::SinkError;
use sinkgap::commands::{
    calibration_init_command, load_calibration, policies_command, require_non_negative,
    run_analysis, run_assessment, run_emissions, run_manifest, AssessArgs,
};
use sinkgap::snapshot::ImageFileSnapshot;
use tempfile::tempdir;

fn solid_png(path: &Path, w: u32, h: u32, px: [u8; 3]) {
    RgbImage::from_pixel(w, h, Rgb(px)).save(path).expect("save png");
}

fn policies(dir: &Path) -> String {
    let path = dir.join("policies.csv");
    fs::write(
        &path,
        "State,Policy Name,Planting Species,Target Area (in hectares)\n\
         Odisha,Green Odisha Mission,Teak,5\n",
    )
    .expect("write csv");
    path.to_string_lossy().to_string()
}

#[test]
fn image_file_snapshot_decodes_png_into_raster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("veg.png");
    solid_png(&path, 3, 2, [0, 150, 0]);

    let provider = ImageFileSnapshot::new(&path);
    assert_eq!(provider.path(), path.as_path());
    match provider.snapshot().unwrap() {
        Snapshot::Raster(raster) => {
            assert_eq!(raster.width(), 3);
            assert_eq!(raster.height(), 2);
        }
        other => panic!("expected raster, got {other:?}"),
    }
}

#[test]
fn image_file_snapshot_distinguishes_missing_from_corrupt() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.png");
    let err = ImageFileSnapshot::new(&missing).snapshot().unwrap_err();
    assert_eq!(err, SinkError::MissingSnapshot(missing));

    let corrupt = dir.path().join("corrupt.jpg");
    fs::write(&corrupt, [0u8, 1, 2, 3]).unwrap();
    let snap = ImageFileSnapshot::new(&corrupt).snapshot().unwrap();
    assert!(matches!(snap, Snapshot::Unreadable { .. }));
}

#[test]
fn run_analysis_counts_vegetation_pixels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("veg.png");
    solid_png(&path, 4, 4, [0, 150, 0]);

    let analysis = run_analysis(&path.to_string_lossy(), None).unwrap();
    assert!(analysis.readable);
    assert_eq!(analysis.counts.vegetation_pixels, 16);
    assert_eq!(analysis.counts.water_pixels, 0);
    assert_relative_eq!(analysis.vegetation_pct, 100.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.total_absorption_kg(), 88.0, epsilon = 1e-9);
}

#[test]
fn run_analysis_of_white_image_is_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snow.png");
    solid_png(&path, 5, 5, [255, 255, 255]);

    let analysis = run_analysis(&path.to_string_lossy(), None).unwrap();
    assert!(analysis.readable);
    assert_eq!(analysis.counts.vegetation_pixels, 0);
    assert_eq!(analysis.total_absorption_kg(), 0.0);
}

#[test]
fn run_assessment_surplus_when_sink_exceeds_emissions() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("veg.png");
    solid_png(&image, 4, 4, [0, 150, 0]);

    let args = AssessArgs {
        image: image.to_string_lossy().to_string(),
        emissions_kg: 50.0,
        region: "Odisha".into(),
        policies: policies(dir.path()),
        config: None,
    };
    let (_, assessment) = run_assessment(&args).unwrap();
    assert_relative_eq!(assessment.gap_kg, -38.0, epsilon = 1e-9);
    assert_eq!(assessment.gap_status, GapStatus::Surplus);
    assert!(assessment.verdict.sufficient);
}

#[test]
fn run_assessment_errors_on_missing_policy_file() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("veg.png");
    solid_png(&image, 2, 2, [0, 150, 0]);

    let args = AssessArgs {
        image: image.to_string_lossy().to_string(),
        emissions_kg: 10.0,
        region: "Odisha".into(),
        policies: dir.path().join("absent.csv").to_string_lossy().to_string(),
        config: None,
    };
    let err = run_assessment(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to load policy table"));
}

#[test]
fn run_assessment_rejects_nan_emissions() {
    let args = AssessArgs {
        image: "unused.png".into(),
        emissions_kg: f64::NAN,
        region: "Odisha".into(),
        policies: "unused.csv".into(),
        config: None,
    };
    assert!(run_assessment(&args).is_err());
}

#[test]
fn require_non_negative_accepts_zero_and_rejects_negative() {
    assert_eq!(require_non_negative("x", 0.0).unwrap(), 0.0);
    assert!(require_non_negative("x", -0.1).is_err());
    assert!(require_non_negative("x", f64::INFINITY).is_err());
}

#[test]
fn run_emissions_combines_factors_and_workforce() {
    let activity = ActivityData { coal_tonnes: 1.0, methane_kg: 2.0, ..Default::default() };
    // 1 t coal * 1000 * 2.42 + 2 kg methane * 25 = 2470
    let est = run_emissions(&activity, Some(10), Some(2.0), None).unwrap();
    assert_relative_eq!(est.total_kg, 2470.0, epsilon = 1e-9);
    assert_relative_eq!(est.per_capita_kg.unwrap(), 123.5, epsilon = 1e-9);
    assert!(est.required_land_hectares.is_none());
}

#[test]
fn run_emissions_rejects_negative_activity() {
    let activity = ActivityData { diesel_litres: -1.0, ..Default::default() };
    assert!(run_emissions(&activity, None, None, None).is_err());
    assert!(run_emissions(&ActivityData::default(), None, None, Some(-3.0)).is_err());
}

#[test]
fn policies_command_check_unique_passes_for_distinct_regions() {
    let dir = tempdir().unwrap();
    let path = policies(dir.path());
    policies_command(&path, false, true).unwrap();
    policies_command(&path, true, false).unwrap();
}

#[test]
fn calibration_init_writes_loadable_json_and_respects_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("cal.json");
    let path_str = path.to_string_lossy().to_string();

    calibration_init_command(&path_str, false).unwrap();
    let loaded = load_calibration(Some(&path_str)).unwrap();
    assert_eq!(loaded, sink_core::Calibration::default());

    assert!(calibration_init_command(&path_str, false).is_err());
    calibration_init_command(&path_str, true).unwrap();
}

#[test]
fn calibration_init_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cal.toml");
    assert!(calibration_init_command(&path.to_string_lossy(), false).is_err());
    assert!(!path.exists());
}

#[test]
fn run_manifest_keeps_site_order_and_isolates_failures() {
    let dir = tempdir().unwrap();
    solid_png(&dir.path().join("a.png"), 2, 2, [0, 150, 0]);
    solid_png(&dir.path().join("c.png"), 2, 2, [0, 0, 200]);
    let manifest = dir.path().join("sites.yaml");
    fs::write(
        &manifest,
        "sites:\n\
         \x20 - {name: a, image: a.png, emissions_kg: 10, region: Odisha}\n\
         \x20 - {name: b, image: b.png, emissions_kg: 10, region: Odisha}\n\
         \x20 - {name: c, image: c.png, emissions_kg: 10, region: Odisha}\n",
    )
    .unwrap();

    let outcomes =
        run_manifest(&manifest.to_string_lossy(), &policies(dir.path()), None).unwrap();
    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(outcomes[0].is_ok());
    assert!(!outcomes[1].is_ok());
    assert!(outcomes[2].is_ok());

    // 4 water px * 0.25 m2 * 5 = 5 kg.
    let water = outcomes[2].assessment.as_ref().unwrap();
    assert_relative_eq!(water.total_absorption_kg(), 5.0, epsilon = 1e-9);
}
