use serde::{Deserialize, Serialize};

use crate::calibration::{Calibration, DuplicateRegions, SQUARE_METERS_PER_HECTARE};
use crate::error::{SinkError, SinkResult};
use crate::policy::{PolicyRecord, PolicyTable};

/// Outcome of matching a sink gap against a region's afforestation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    /// Region as supplied by the caller.
    pub region: String,
    pub policy_found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planting_species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_area_hectares: Option<f64>,
    /// Absent when no policy was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afforestation_potential_kg: Option<f64>,
    /// False when no policy was found.
    pub sufficient: bool,
    /// Present only when a policy was found and falls short of the gap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_gap_kg: Option<f64>,
}

impl PolicyVerdict {
    fn not_found(region: &str) -> Self {
        Self {
            region: region.to_string(),
            policy_found: false,
            policy_name: None,
            planting_species: None,
            target_area_hectares: None,
            afforestation_potential_kg: None,
            sufficient: false,
            residual_gap_kg: None,
        }
    }

    /// Human-readable recommendation for this verdict.
    pub fn recommendation(&self) -> String {
        let (Some(name), Some(potential)) =
            (self.policy_name.as_deref(), self.afforestation_potential_kg)
        else {
            return "No specific policy found for this state.".to_string();
        };

        match self.residual_gap_kg {
            Some(residual) if !self.sufficient => format!(
                "State policy '{name}' can absorb {potential:.2} kg of CO₂, but additional \
                 afforestation is needed to cover the remaining gap of {residual:.2} kg."
            ),
            _ => format!(
                "State policy '{name}' can absorb {potential:.2} kg of CO₂, which is sufficient \
                 to offset the remaining emissions."
            ),
        }
    }
}

/// Annual absorption achievable by planting a policy's full target area.
///
/// Uses the vegetation rate for every species: the reference data carries no
/// per-species rates, so `planting_species` does not enter the calculation.
pub fn afforestation_potential_kg(record: &PolicyRecord, calibration: &Calibration) -> f64 {
    record.target_area_hectares * SQUARE_METERS_PER_HECTARE * calibration.green_absorption_rate
}

/// Look up `region` and decide whether its policy closes `signed_gap_kg`.
///
/// Lookup is case-insensitive. With `DuplicateRegions::FirstMatch` the first
/// matching row wins; with `DuplicateRegions::Reject` several matching rows are
/// an `AmbiguousRegion` error. A miss is a normal verdict, not an error.
pub fn match_policy(
    region: &str,
    signed_gap_kg: f64,
    table: &PolicyTable,
    calibration: &Calibration,
) -> SinkResult<PolicyVerdict> {
    let record = match calibration.duplicate_regions {
        DuplicateRegions::FirstMatch => table.find_first(region),
        DuplicateRegions::Reject => {
            let matches: Vec<&PolicyRecord> = table.find_all(region).collect();
            if matches.len() > 1 {
                return Err(SinkError::AmbiguousRegion {
                    region: region.to_string(),
                    count: matches.len(),
                });
            }
            matches.into_iter().next()
        }
    };

    let Some(record) = record else {
        tracing::debug!(region, rows = table.len(), "no policy for region");
        return Ok(PolicyVerdict::not_found(region));
    };

    let potential = afforestation_potential_kg(record, calibration);
    let sufficient = potential >= signed_gap_kg;
    tracing::debug!(region, policy = %record.policy_name, potential, sufficient, "matched policy");

    Ok(PolicyVerdict {
        region: region.to_string(),
        policy_found: true,
        policy_name: Some(record.policy_name.clone()),
        planting_species: Some(record.planting_species.clone()),
        target_area_hectares: Some(record.target_area_hectares),
        afforestation_potential_kg: Some(potential),
        sufficient,
        residual_gap_kg: (!sufficient).then(|| signed_gap_kg - potential),
    })
}
