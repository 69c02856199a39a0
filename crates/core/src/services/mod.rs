//! Pipeline services layered on top of image analysis: the snapshot seam, gap
//! analysis, policy matching, the single-site pipeline and the batch runner.

pub mod batch;
pub mod gap;
pub mod matcher;
pub mod pipeline;
pub mod snapshot;

pub use batch::{run_batch, BatchOutcome, BatchSite, ManifestError, SiteManifest, SiteSpec};
pub use gap::{gap, validate_emissions, GapStatus};
pub use matcher::{afforestation_potential_kg, match_policy, PolicyVerdict};
pub use pipeline::{assess, assess_with_provider, SinkAssessment};
pub use snapshot::{InMemorySnapshot, Snapshot, SnapshotProvider};
