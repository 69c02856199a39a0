use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sink_core::services::{assess_with_provider, SinkAssessment};
use sink_core::Calibration;

use crate::commands::{
    load_calibration, load_policy_table, print_analysis, print_gap, print_verdict,
    require_non_negative,
};
use crate::sha256_file;
use crate::snapshot::ImageFileSnapshot;

/// Operator inputs for a single-site assessment.
#[derive(Debug, Clone)]
pub struct AssessArgs {
    pub image: String,
    pub emissions_kg: f64,
    pub region: String,
    pub policies: String,
    pub config: Option<String>,
}

/// Persisted record of one assessment, written with `--report`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: String,
    pub tool_version: String,
    pub image: String,
    pub image_sha256: String,
    pub region: String,
    pub policies: String,
    pub calibration: Calibration,
    pub assessment: SinkAssessment,
}

/// Run the full pipeline for one site and return the assessment.
pub fn run_assessment(args: &AssessArgs) -> Result<(Calibration, SinkAssessment)> {
    let emissions = require_non_negative("Reported emissions", args.emissions_kg)?;
    let calibration = load_calibration(args.config.as_deref())?;
    let table = load_policy_table(&args.policies)?;

    let provider = ImageFileSnapshot::new(&args.image);
    let assessment = assess_with_provider(&provider, emissions, &args.region, &table, &calibration)
        .with_context(|| format!("Failed to assess site image {}", args.image))?;
    tracing::info!(
        region = %args.region,
        gap_kg = assessment.gap_kg,
        policy_found = assessment.verdict.policy_found,
        "assessment complete"
    );
    Ok((calibration, assessment))
}

pub fn assess_command(args: &AssessArgs, json: bool, report: Option<&str>) -> Result<()> {
    let (calibration, assessment) = run_assessment(args)?;

    if let Some(report_path) = report {
        write_report(Path::new(report_path), args, calibration, &assessment)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    print_analysis(&assessment.analysis);
    print_gap(assessment.reported_emissions_kg, assessment.total_absorption_kg(), assessment.gap_kg);
    print_verdict(&assessment.verdict);
    if let Some(report_path) = report {
        println!("Report written to {report_path}");
    }
    Ok(())
}

fn write_report(
    path: &Path,
    args: &AssessArgs,
    calibration: Calibration,
    assessment: &SinkAssessment,
) -> Result<()> {
    let report = AssessmentReport {
        generated_at: Utc::now().to_rfc3339(),
        tool_version: sink_core::version().to_string(),
        image: args.image.clone(),
        image_sha256: sha256_file(Path::new(&args.image))?,
        region: args.region.clone(),
        policies: args.policies.clone(),
        calibration,
        assessment: assessment.clone(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report dir: {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    fs::write(path, body).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
