use anyhow::{Context, Result};
use sink_core::analysis::{analyze_snapshot, ImageAnalysis};
use sink_core::services::SnapshotProvider;

use crate::commands::{load_calibration, print_analysis};
use crate::snapshot::ImageFileSnapshot;

/// Classify a map image and estimate its absorption, without gap or policy.
pub fn run_analysis(image: &str, config: Option<&str>) -> Result<ImageAnalysis> {
    let calibration = load_calibration(config)?;
    let snapshot = ImageFileSnapshot::new(image)
        .snapshot()
        .with_context(|| format!("Failed to obtain map image from {image}"))?;
    Ok(analyze_snapshot(&snapshot, &calibration))
}

pub fn analyze_command(image: &str, config: Option<&str>, json: bool) -> Result<()> {
    let analysis = run_analysis(image, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}
