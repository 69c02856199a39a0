//! Heuristic constants for classification, area reconstruction and absorption.
//!
//! None of these values are calibrated measurements. They are the defaults the
//! estimator ships with and can be overridden per run from a YAML or JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Each pixel edge represents this many real-world meters.
pub const DEFAULT_PIXEL_TO_METER: f64 = 0.5;
/// kg CO2 absorbed per m2 of vegetation per year.
pub const DEFAULT_GREEN_ABSORPTION_RATE: f64 = 22.0;
/// kg CO2 absorbed per m2 of wetland/water per year.
pub const DEFAULT_WETLANDS_ABSORPTION_RATE: f64 = 5.0;
/// Low estimate of kg CO2 absorbed by one tree per year.
pub const DEFAULT_TREE_CO2_MIN: f64 = 10.0;
/// High estimate of kg CO2 absorbed by one tree per year.
pub const DEFAULT_TREE_CO2_MAX: f64 = 40.0;
/// Pixels with every channel at or above this value are treated as basemap chrome.
pub const DEFAULT_NEUTRAL_FLOOR: u8 = 200;

/// Square meters per hectare.
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Inclusive bounds for one color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub low: u8,
    pub high: u8,
}

impl ChannelRange {
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: u8) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Inclusive RGB box used to match a land-cover class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub r: ChannelRange,
    pub g: ChannelRange,
    pub b: ChannelRange,
}

impl ColorRange {
    pub const fn new(r: ChannelRange, g: ChannelRange, b: ChannelRange) -> Self {
        Self { r, g, b }
    }

    /// Default vegetation box: R 0..=100, G 100..=255, B 0..=100.
    pub const fn vegetation() -> Self {
        Self::new(ChannelRange::new(0, 100), ChannelRange::new(100, 255), ChannelRange::new(0, 100))
    }

    /// Default water box: R 0..=100, G 0..=100, B 100..=255.
    pub const fn water() -> Self {
        Self::new(ChannelRange::new(0, 100), ChannelRange::new(0, 100), ChannelRange::new(100, 255))
    }

    pub fn contains(&self, r: u8, g: u8, b: u8) -> bool {
        self.r.contains(r) && self.g.contains(g) && self.b.contains(b)
    }

    fn is_well_formed(&self) -> bool {
        self.r.low <= self.r.high && self.g.low <= self.g.high && self.b.low <= self.b.high
    }
}

/// What the policy matcher does when several rows share a region name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRegions {
    /// Use the first row in table order.
    #[default]
    FirstMatch,
    /// Refuse to match and report the ambiguity.
    Reject,
}

/// Explicit configuration passed into every pipeline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub pixel_to_meter: f64,
    pub green_absorption_rate: f64,
    pub wetlands_absorption_rate: f64,
    pub tree_co2_min: f64,
    pub tree_co2_max: f64,
    pub vegetation_range: ColorRange,
    pub water_range: ColorRange,
    pub neutral_floor: u8,
    pub duplicate_regions: DuplicateRegions,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pixel_to_meter: DEFAULT_PIXEL_TO_METER,
            green_absorption_rate: DEFAULT_GREEN_ABSORPTION_RATE,
            wetlands_absorption_rate: DEFAULT_WETLANDS_ABSORPTION_RATE,
            tree_co2_min: DEFAULT_TREE_CO2_MIN,
            tree_co2_max: DEFAULT_TREE_CO2_MAX,
            vegetation_range: ColorRange::vegetation(),
            water_range: ColorRange::water(),
            neutral_floor: DEFAULT_NEUTRAL_FLOOR,
            duplicate_regions: DuplicateRegions::FirstMatch,
        }
    }
}

/// Error type for loading and validating calibration files.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Failed to read calibration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML calibration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON calibration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported calibration format '{0}'; expected .yaml, .yml or .json")]
    UnsupportedFormat(String),

    #[error("Invalid calibration: {0}")]
    Invalid(String),
}

impl Calibration {
    /// Builder-style override of the pixel-to-meter ratio.
    pub fn with_pixel_to_meter(mut self, pixel_to_meter: f64) -> Self {
        self.pixel_to_meter = pixel_to_meter;
        self
    }

    /// Builder-style override of the duplicate-region tie-break.
    pub fn with_duplicate_regions(mut self, policy: DuplicateRegions) -> Self {
        self.duplicate_regions = policy;
        self
    }

    /// Real-world area covered by one pixel, in m2.
    pub fn pixel_area_m2(&self) -> f64 {
        self.pixel_to_meter * self.pixel_to_meter
    }

    /// Check every constant for values that would make the model meaningless.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.pixel_to_meter) {
            return Err(CalibrationError::Invalid(format!(
                "pixel_to_meter must be positive (got {})",
                self.pixel_to_meter
            )));
        }
        if !non_negative(self.green_absorption_rate) {
            return Err(CalibrationError::Invalid(format!(
                "green_absorption_rate must be non-negative (got {})",
                self.green_absorption_rate
            )));
        }
        if !non_negative(self.wetlands_absorption_rate) {
            return Err(CalibrationError::Invalid(format!(
                "wetlands_absorption_rate must be non-negative (got {})",
                self.wetlands_absorption_rate
            )));
        }
        if !positive(self.tree_co2_min) || !positive(self.tree_co2_max) {
            return Err(CalibrationError::Invalid(format!(
                "tree CO2 bounds must be positive (got {}..{})",
                self.tree_co2_min, self.tree_co2_max
            )));
        }
        if self.tree_co2_min > self.tree_co2_max {
            return Err(CalibrationError::Invalid(format!(
                "tree_co2_min ({}) exceeds tree_co2_max ({})",
                self.tree_co2_min, self.tree_co2_max
            )));
        }
        if !self.vegetation_range.is_well_formed() || !self.water_range.is_well_formed() {
            return Err(CalibrationError::Invalid(
                "color ranges must have low <= high on every channel".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a calibration body in the given format (`yaml`, `yml` or `json`).
    pub fn from_str_with_format(body: &str, format: &str) -> Result<Self, CalibrationError> {
        let calibration: Calibration = match format {
            "yaml" | "yml" => serde_yaml::from_str(body)?,
            "json" => serde_json::from_str(body)?,
            other => return Err(CalibrationError::UnsupportedFormat(other.to_string())),
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Load and validate a calibration file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, CalibrationError> {
        let format = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
        if !matches!(format.as_str(), "yaml" | "yml" | "json") {
            return Err(CalibrationError::UnsupportedFormat(format));
        }
        let body = std::fs::read_to_string(path).map_err(|source| CalibrationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str_with_format(&body, &format)
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CalibrationError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
