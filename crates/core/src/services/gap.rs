use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, SinkError, SinkResult};

/// Sign of the sink gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// Emissions exceed absorption.
    Deficit,
    Balanced,
    /// Absorption exceeds emissions.
    Surplus,
}

impl GapStatus {
    pub fn of(gap_kg: f64) -> Self {
        if gap_kg > 0.0 {
            GapStatus::Deficit
        } else if gap_kg < 0.0 {
            GapStatus::Surplus
        } else {
            GapStatus::Balanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GapStatus::Deficit => "deficit",
            GapStatus::Balanced => "balanced",
            GapStatus::Surplus => "surplus",
        }
    }
}

/// Signed gap between reported emissions and estimated absorption.
///
/// Not clamped: a negative value is a surplus and the policy matcher relies on
/// seeing it.
pub fn gap(reported_emissions_kg: f64, total_absorption_kg: f64) -> f64 {
    reported_emissions_kg - total_absorption_kg
}

/// Boundary check for a reported emission figure.
pub fn validate_emissions(reported_emissions_kg: f64) -> SinkResult<f64> {
    if ensure_non_negative(reported_emissions_kg) {
        Ok(reported_emissions_kg)
    } else {
        Err(SinkError::InvalidEmissions(reported_emissions_kg))
    }
}
