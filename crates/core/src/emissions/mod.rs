//! Activity-based estimate of a site's annual CO2 emissions.
//!
//! This produces the emission figure the gap analyzer consumes when no measured
//! value is available. Factors are kg CO2 per unit of activity.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, SinkError, SinkResult};

/// Emission factors, kg CO2 per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Per litre of diesel.
    pub diesel: f64,
    /// Per kWh of electricity.
    pub electricity: f64,
    /// Per kg of methane released (CO2-equivalent).
    pub methane: f64,
    /// Per kg of coal produced.
    pub coal: f64,
    /// Per tonne-km of transport.
    pub transportation: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self { diesel: 2.68, electricity: 0.4, methane: 25.0, coal: 2.42, transportation: 0.27 }
    }
}

/// Activity data for one site over one year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityData {
    pub diesel_litres: f64,
    pub electricity_kwh: f64,
    pub methane_kg: f64,
    /// Coal produced, in tonnes.
    pub coal_tonnes: f64,
    pub transport_distance_km: f64,
    /// Tonnes carried per trip.
    pub transport_weight_tonnes: f64,
}

impl ActivityData {
    fn validate(&self) -> SinkResult<()> {
        let fields = [
            ("diesel_litres", self.diesel_litres),
            ("electricity_kwh", self.electricity_kwh),
            ("methane_kg", self.methane_kg),
            ("coal_tonnes", self.coal_tonnes),
            ("transport_distance_km", self.transport_distance_km),
            ("transport_weight_tonnes", self.transport_weight_tonnes),
        ];
        for (field, value) in fields {
            if !ensure_non_negative(value) {
                return Err(SinkError::InvalidActivity { field, value });
            }
        }
        Ok(())
    }
}

/// Workforce figures used for per-capita intensity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Workforce {
    pub workers: u32,
    pub working_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionEstimate {
    pub total_kg: f64,
    /// kg CO2 per worker-hour; absent without a workforce or with zero hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_capita_kg: Option<f64>,
    /// Land needed to sequester `total_kg` at the given rate (kg per hectare per year).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_land_hectares: Option<f64>,
}

/// Sum activity data against the emission factors.
pub fn estimate_emissions(
    activity: &ActivityData,
    factors: &EmissionFactors,
    workforce: Option<Workforce>,
    sequestration_rate_kg_per_hectare: Option<f64>,
) -> SinkResult<EmissionEstimate> {
    activity.validate()?;

    let total_kg = activity.diesel_litres * factors.diesel
        + activity.electricity_kwh * factors.electricity
        + activity.methane_kg * factors.methane
        + activity.coal_tonnes * 1000.0 * factors.coal
        + activity.transport_distance_km * activity.transport_weight_tonnes * factors.transportation;

    let per_capita_kg = workforce.and_then(|w| {
        let worker_hours = w.workers as f64 * w.working_hours;
        (worker_hours > 0.0).then(|| total_kg / worker_hours)
    });
    let required_land_hectares =
        sequestration_rate_kg_per_hectare.filter(|rate| *rate > 0.0).map(|rate| total_kg / rate);

    Ok(EmissionEstimate { total_kg, per_capita_kg, required_land_hectares })
}
