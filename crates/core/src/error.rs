use std::path::PathBuf;

use thiserror::Error;

/// Boundary errors for the sink pipeline.
///
/// Degenerate inputs (unreadable image, zero pixels, empty policy table) are
/// never reported through this type; they produce zeroed or empty results.
#[derive(Debug, Error, PartialEq)]
pub enum SinkError {
    #[error("Reported emissions must be a finite, non-negative number of kg CO2/year (got {0})")]
    InvalidEmissions(f64),

    #[error("Target area for region '{region}' must be finite and non-negative (got {hectares} ha)")]
    InvalidTargetArea { region: String, hectares: f64 },

    #[error("Policy record has an empty region name")]
    EmptyRegionName,

    #[error("Activity value '{field}' must be finite and non-negative (got {value})")]
    InvalidActivity { field: &'static str, value: f64 },

    #[error("Raster buffer length {len} does not match {width}x{height}x3")]
    RasterSize { width: u32, height: u32, len: usize },

    #[error("Region '{region}' matches {count} policy records; refusing to pick one")]
    AmbiguousRegion { region: String, count: usize },

    #[error("Invalid calibration: {0}")]
    Calibration(String),

    #[error("Snapshot source not found at {0}")]
    MissingSnapshot(PathBuf),
}

/// Convenience result type for core operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Reject NaN, infinities and negatives for a quantity entering the core.
pub(crate) fn ensure_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
