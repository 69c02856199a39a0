use anyhow::{Context, Result};
use sink_core::emissions::{
    estimate_emissions, ActivityData, EmissionEstimate, EmissionFactors, Workforce,
};

use crate::commands::require_non_negative;

/// Estimate a site's annual emissions from activity data.
pub fn run_emissions(
    activity: &ActivityData,
    workers: Option<u32>,
    hours: Option<f64>,
    sequestration_rate: Option<f64>,
) -> Result<EmissionEstimate> {
    let workforce = match (workers, hours) {
        (Some(workers), Some(hours)) => Some(Workforce {
            workers,
            working_hours: require_non_negative("Working hours", hours)?,
        }),
        _ => None,
    };
    let rate = sequestration_rate
        .map(|r| require_non_negative("Sequestration rate", r))
        .transpose()?;

    estimate_emissions(activity, &EmissionFactors::default(), workforce, rate)
        .context("Invalid activity data")
}

pub fn emissions_command(
    activity: &ActivityData,
    workers: Option<u32>,
    hours: Option<f64>,
    sequestration_rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let estimate = run_emissions(activity, workers, hours, sequestration_rate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!("Total emissions: {:.2} kg CO2", estimate.total_kg);
    if let Some(per_capita) = estimate.per_capita_kg {
        println!("Per capita emissions: {:.6} kg CO2", per_capita);
    }
    if let Some(land) = estimate.required_land_hectares {
        println!("Land required for afforestation: {:.2} hectares", land);
    }
    Ok(())
}
