use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;

/// Annual CO2 absorption attributed to the classified land cover.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbsorptionEstimate {
    pub vegetation_absorption_kg_per_year: f64,
    pub water_absorption_kg_per_year: f64,
    pub total_absorption_kg_per_year: f64,
    /// Trees needed at the high per-tree absorption bound.
    pub trees_equivalent_min: f64,
    /// Trees needed at the low per-tree absorption bound.
    pub trees_equivalent_max: f64,
}

impl AbsorptionEstimate {
    /// Estimate for an image that absorbed nothing (or could not be read).
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Convert classified areas into absorption mass and a tree-count range.
///
/// Dividing by the *maximum* per-tree absorption gives the *minimum* tree count.
pub fn estimate(
    vegetation_area_m2: f64,
    water_area_m2: f64,
    calibration: &Calibration,
) -> AbsorptionEstimate {
    let vegetation = vegetation_area_m2 * calibration.green_absorption_rate;
    let water = water_area_m2 * calibration.wetlands_absorption_rate;
    let total = vegetation + water;

    AbsorptionEstimate {
        vegetation_absorption_kg_per_year: vegetation,
        water_absorption_kg_per_year: water,
        total_absorption_kg_per_year: total,
        trees_equivalent_min: total / calibration.tree_co2_max,
        trees_equivalent_max: total / calibration.tree_co2_min,
    }
}
