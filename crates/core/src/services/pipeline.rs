use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_snapshot, ImageAnalysis};
use crate::calibration::Calibration;
use crate::error::{SinkError, SinkResult};
use crate::policy::PolicyTable;
use crate::services::gap::{gap, validate_emissions, GapStatus};
use crate::services::matcher::{match_policy, PolicyVerdict};
use crate::services::snapshot::{Snapshot, SnapshotProvider};

/// Everything derived from one site: image analysis, sink gap, and policy verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkAssessment {
    pub analysis: ImageAnalysis,
    pub reported_emissions_kg: f64,
    pub gap_kg: f64,
    pub gap_status: GapStatus,
    pub verdict: PolicyVerdict,
}

impl SinkAssessment {
    pub fn total_absorption_kg(&self) -> f64 {
        self.analysis.total_absorption_kg()
    }
}

/// Run the full pipeline over an already-obtained snapshot.
///
/// Pure in its inputs: the same snapshot, emissions, region, table and
/// calibration always give the same assessment, so calls can run in parallel.
pub fn assess(
    snapshot: &Snapshot,
    reported_emissions_kg: f64,
    region: &str,
    table: &PolicyTable,
    calibration: &Calibration,
) -> SinkResult<SinkAssessment> {
    calibration.validate().map_err(|e| SinkError::Calibration(e.to_string()))?;
    let reported_emissions_kg = validate_emissions(reported_emissions_kg)?;

    let analysis = analyze_snapshot(snapshot, calibration);
    let gap_kg = gap(reported_emissions_kg, analysis.total_absorption_kg());
    let verdict = match_policy(region, gap_kg, table, calibration)?;

    Ok(SinkAssessment {
        analysis,
        reported_emissions_kg,
        gap_kg,
        gap_status: GapStatus::of(gap_kg),
        verdict,
    })
}

/// Obtain a snapshot from `provider` and assess it.
pub fn assess_with_provider(
    provider: &dyn SnapshotProvider,
    reported_emissions_kg: f64,
    region: &str,
    table: &PolicyTable,
    calibration: &Calibration,
) -> SinkResult<SinkAssessment> {
    // Reject bad emissions before touching the provider.
    validate_emissions(reported_emissions_kg)?;
    let snapshot = provider.snapshot()?;
    tracing::debug!(provider = provider.name(), "obtained snapshot");
    assess(&snapshot, reported_emissions_kg, region, table, calibration)
}
