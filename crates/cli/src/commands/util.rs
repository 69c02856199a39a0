use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sink_core::analysis::ImageAnalysis;
use sink_core::policy::{CsvPolicyFile, PolicyRepository, PolicyTable};
use sink_core::services::PolicyVerdict;
use sink_core::Calibration;

/// Load the calibration file if one was given, otherwise the defaults.
pub fn load_calibration(config: Option<&str>) -> Result<Calibration> {
    match config {
        Some(path) => Calibration::load(Path::new(path))
            .with_context(|| format!("Failed to load calibration from {path}")),
        None => Ok(Calibration::default()),
    }
}

/// Load the policy CSV from disk.
pub fn load_policy_table(path: &str) -> Result<PolicyTable> {
    let table = CsvPolicyFile::new(path)
        .load()
        .with_context(|| format!("Failed to load policy table from {path}"))?;
    tracing::info!(path, rows = table.len(), "loaded policy table");
    Ok(table)
}

/// Reject negative or non-finite operator input before it reaches the core.
pub fn require_non_negative(label: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(anyhow!("{label} must be a non-negative number (got {value})"))
    }
}

/// Print the image-analysis block shared by `analyze`, `assess` and `batch`.
pub fn print_analysis(analysis: &ImageAnalysis) {
    if !analysis.readable {
        println!("Image could not be decoded; treating absorption as zero.");
    } else {
        println!("Image: {}x{} px", analysis.width, analysis.height);
        println!(
            "Vegetation: {:.2}% ({:.2} m²)",
            analysis.vegetation_pct, analysis.areas.vegetation_area_m2
        );
        println!("Water: {:.2}% ({:.2} m²)", analysis.water_pct, analysis.areas.water_area_m2);
    }
    let absorption = &analysis.absorption;
    println!("Total CO₂ Absorption: {:.2} kg", absorption.total_absorption_kg_per_year);
    println!(
        "Trees Needed: {:.2} - {:.2}",
        absorption.trees_equivalent_min, absorption.trees_equivalent_max
    );
}

/// Print the gap block.
pub fn print_gap(emissions_kg: f64, absorption_kg: f64, gap_kg: f64) {
    println!("CO₂ Sink Gap Analysis:");
    println!("Total CO₂ Emissions: {:.2} kg", emissions_kg);
    println!("Total CO₂ Absorption: {:.2} kg", absorption_kg);
    println!("CO₂ Sink Gap: {:.2} kg", gap_kg);
}

pub fn print_verdict(verdict: &PolicyVerdict) {
    println!("{}", verdict.recommendation());
}
