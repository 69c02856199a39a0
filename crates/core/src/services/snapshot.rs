use crate::error::SinkResult;
use crate::model::RasterImage;

/// Outcome of asking a provider for a map image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Raster(RasterImage),
    /// The source existed but could not be decoded. Analysis reports zero absorption.
    Unreadable { reason: String },
}

impl Snapshot {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Snapshot::Unreadable { reason: reason.into() }
    }

    pub fn raster(&self) -> Option<&RasterImage> {
        match self {
            Snapshot::Raster(image) => Some(image),
            Snapshot::Unreadable { .. } => None,
        }
    }
}

impl From<RasterImage> for Snapshot {
    fn from(image: RasterImage) -> Self {
        Snapshot::Raster(image)
    }
}

/// Supplies the top-down raster for a site (file decoder, screenshot tool, ...).
///
/// Errors are reserved for boundary failures such as a missing source; a source
/// that exists but cannot be decoded is `Snapshot::Unreadable`.
pub trait SnapshotProvider: Send + Sync {
    fn snapshot(&self) -> SinkResult<Snapshot>;
    fn name(&self) -> &str;
}

/// Provider over an image already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySnapshot {
    image: RasterImage,
}

impl InMemorySnapshot {
    pub fn new(image: RasterImage) -> Self {
        Self { image }
    }
}

impl SnapshotProvider for InMemorySnapshot {
    fn snapshot(&self) -> SinkResult<Snapshot> {
        Ok(Snapshot::Raster(self.image.clone()))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
