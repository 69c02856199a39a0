//! Image analysis: land-cover classification, area reconstruction and
//! absorption estimation.
//!
//! The three stages run back to back over one raster and produce a single
//! `ImageAnalysis`. An unreadable snapshot skips all three and yields the zeroed
//! analysis so downstream gap and policy stages still have a number to work with.

pub mod absorption;
pub mod area;
pub mod classifier;

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::model::RasterImage;
use crate::services::snapshot::Snapshot;

pub use absorption::{estimate, AbsorptionEstimate};
pub use area::{coverage_pct, reconstruct_area, AreaMeasurement, MaskCounts};
pub use classifier::{classify, classify_pixel, LandCoverMasks};

/// Result of analyzing one map snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// False when the snapshot could not be decoded and the zeroed estimate was used.
    pub readable: bool,
    pub width: u32,
    pub height: u32,
    pub counts: MaskCounts,
    pub vegetation_pct: f64,
    pub water_pct: f64,
    pub areas: AreaMeasurement,
    pub absorption: AbsorptionEstimate,
}

impl ImageAnalysis {
    /// Analysis for a snapshot that could not be read.
    pub fn unreadable() -> Self {
        Self {
            readable: false,
            width: 0,
            height: 0,
            counts: MaskCounts::default(),
            vegetation_pct: 0.0,
            water_pct: 0.0,
            areas: AreaMeasurement::default(),
            absorption: AbsorptionEstimate::zero(),
        }
    }

    pub fn total_absorption_kg(&self) -> f64 {
        self.absorption.total_absorption_kg_per_year
    }
}

/// Run classification, area reconstruction and absorption over a decoded raster.
pub fn analyze_image(image: &RasterImage, calibration: &Calibration) -> ImageAnalysis {
    let masks = classify(image, calibration);
    let counts = MaskCounts {
        vegetation_pixels: masks.vegetation_pixels(),
        water_pixels: masks.water_pixels(),
    };
    let total_pixels = image.pixel_count();
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        vegetation = counts.vegetation_pixels,
        water = counts.water_pixels,
        "classified raster"
    );

    let areas = reconstruct_area(counts, image.height(), image.width(), calibration);
    let absorption = estimate(areas.vegetation_area_m2, areas.water_area_m2, calibration);

    ImageAnalysis {
        readable: true,
        width: image.width(),
        height: image.height(),
        counts,
        vegetation_pct: coverage_pct(counts.vegetation_pixels, total_pixels),
        water_pct: coverage_pct(counts.water_pixels, total_pixels),
        areas,
        absorption,
    }
}

/// Analyze a snapshot, short-circuiting to the zeroed analysis when unreadable.
pub fn analyze_snapshot(snapshot: &Snapshot, calibration: &Calibration) -> ImageAnalysis {
    match snapshot {
        Snapshot::Raster(image) => analyze_image(image, calibration),
        Snapshot::Unreadable { reason } => {
            tracing::warn!(%reason, "snapshot unreadable; reporting zero absorption");
            ImageAnalysis::unreadable()
        }
    }
}
