use std::path::{Path, PathBuf};

use sink_core::model::RasterImage;
use sink_core::services::{Snapshot, SnapshotProvider};
use sink_core::{SinkError, SinkResult};

/// Snapshot provider backed by an image file (PNG or JPEG) on disk.
///
/// A missing file is an error; a file that exists but fails to decode becomes
/// `Snapshot::Unreadable` so the assessment still runs with zero absorption.
#[derive(Debug, Clone)]
pub struct ImageFileSnapshot {
    path: PathBuf,
}

impl ImageFileSnapshot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotProvider for ImageFileSnapshot {
    fn snapshot(&self) -> SinkResult<Snapshot> {
        if !self.path.is_file() {
            return Err(SinkError::MissingSnapshot(self.path.clone()));
        }

        let decoded = match image::open(&self.path) {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to decode map image");
                return Ok(Snapshot::unreadable(err.to_string()));
            }
        };

        // Decoders hand back RGB(A); alpha is dropped.
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let raster = RasterImage::from_rgb_bytes(width, height, rgb.as_raw())?;
        Ok(Snapshot::Raster(raster))
    }

    fn name(&self) -> &str {
        "image-file"
    }
}
