use crate::calibration::Calibration;
use crate::model::{ClassificationMask, LandCover, RasterImage, Rgb};

/// Vegetation and water masks for one raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandCoverMasks {
    pub vegetation: ClassificationMask,
    pub water: ClassificationMask,
}

impl LandCoverMasks {
    pub fn vegetation_pixels(&self) -> usize {
        self.vegetation.count()
    }

    pub fn water_pixels(&self) -> usize {
        self.water.count()
    }
}

/// Classify a single pixel.
///
/// The neutral test runs first so near-white chrome never lands in a class even
/// when its raw channels fall inside a range. Vegetation is tested before water,
/// which keeps the classes disjoint where the two boxes share a boundary
/// (e.g. `G == B == 100`).
pub fn classify_pixel(pixel: Rgb, calibration: &Calibration) -> LandCover {
    let Rgb { r, g, b } = pixel;
    let floor = calibration.neutral_floor;
    if r >= floor && g >= floor && b >= floor {
        return LandCover::Neutral;
    }
    if calibration.vegetation_range.contains(r, g, b) {
        LandCover::Vegetation
    } else if calibration.water_range.contains(r, g, b) {
        LandCover::Water
    } else {
        LandCover::Other
    }
}

/// Build the vegetation and water masks for `image`.
///
/// Masks always have the image's dimensions and no pixel is set in both.
pub fn classify(image: &RasterImage, calibration: &Calibration) -> LandCoverMasks {
    let (width, height) = (image.width(), image.height());
    let mut vegetation = Vec::with_capacity(image.pixel_count());
    let mut water = Vec::with_capacity(image.pixel_count());

    for &pixel in image.pixels() {
        let class = classify_pixel(pixel, calibration);
        vegetation.push(class == LandCover::Vegetation);
        water.push(class == LandCover::Water);
    }

    LandCoverMasks {
        vegetation: ClassificationMask::new(width, height, vegetation),
        water: ClassificationMask::new(width, height, water),
    }
}
