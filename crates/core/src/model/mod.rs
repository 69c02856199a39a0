//! Core data model: raster images, classification masks, and land-cover classes.
//!
//! Everything here is immutable once built. Classification produces new masks
//! and never touches the source raster.

use serde::{Deserialize, Serialize};

use crate::error::{SinkError, SinkResult};

/// One 8-bit-per-channel pixel in RGB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
}

/// Immutable H x W grid of RGB pixels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RasterImage {
    /// Build a raster from interleaved RGB bytes (`r, g, b, r, g, b, ...`).
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> SinkResult<Self> {
        Self::from_interleaved(width, height, bytes, |c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Build a raster from interleaved BGR bytes, as produced by capture
    /// libraries whose native order is blue-first. Channels are swapped to RGB.
    pub fn from_bgr_bytes(width: u32, height: u32, bytes: &[u8]) -> SinkResult<Self> {
        Self::from_interleaved(width, height, bytes, |c| Rgb::new(c[2], c[1], c[0]))
    }

    /// Build a raster from already-decoded pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> SinkResult<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(SinkError::RasterSize { width, height, len: pixels.len() * 3 });
        }
        Ok(Self { width, height, pixels })
    }

    /// A raster where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let count = (width as usize) * (height as usize);
        Self { width, height, pixels: vec![color; count] }
    }

    fn from_interleaved(
        width: u32,
        height: u32,
        bytes: &[u8],
        to_rgb: impl Fn(&[u8]) -> Rgb,
    ) -> SinkResult<Self> {
        let expected = (width as usize) * (height as usize) * 3;
        if bytes.len() != expected {
            return Err(SinkError::RasterSize { width, height, len: bytes.len() });
        }
        let pixels = bytes.chunks_exact(3).map(to_rgb).collect();
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y as usize) * (self.width as usize) + x as usize).copied()
    }
}

/// Land-cover class assigned to a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandCover {
    Vegetation,
    Water,
    /// Near-white basemap chrome (roads, labels, panels).
    Neutral,
    Other,
}

/// Boolean grid marking the pixels of one land-cover class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ClassificationMask {
    pub(crate) fn new(width: u32, height: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of pixels set in the mask.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when no pixel is set in both masks.
    pub fn is_disjoint(&self, other: &ClassificationMask) -> bool {
        self.cells.iter().zip(other.cells.iter()).all(|(a, b)| !(*a && *b))
    }
}
