use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;

/// Pixel counts per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskCounts {
    pub vegetation_pixels: usize,
    pub water_pixels: usize,
}

/// Real-world areas reconstructed from mask counts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaMeasurement {
    pub vegetation_area_m2: f64,
    pub water_area_m2: f64,
    /// Area covered by the whole image.
    pub image_area_m2: f64,
}

/// Convert pixel counts into m2.
///
/// A zero-pixel image yields zero areas rather than dividing by zero.
pub fn reconstruct_area(
    counts: MaskCounts,
    image_height: u32,
    image_width: u32,
    calibration: &Calibration,
) -> AreaMeasurement {
    let total_pixels = (image_height as u64) * (image_width as u64);
    if total_pixels == 0 {
        return AreaMeasurement::default();
    }

    let image_area_m2 = image_height as f64 * image_width as f64 * calibration.pixel_area_m2();
    let share = |pixels: usize| pixels as f64 / total_pixels as f64;

    AreaMeasurement {
        vegetation_area_m2: share(counts.vegetation_pixels) * image_area_m2,
        water_area_m2: share(counts.water_pixels) * image_area_m2,
        image_area_m2,
    }
}

/// Share of `pixels` over `total`, as a percentage. Zero when `total` is zero.
pub fn coverage_pct(pixels: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        pixels as f64 / total as f64 * 100.0
    }
}
