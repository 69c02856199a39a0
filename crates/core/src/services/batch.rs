use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calibration::Calibration;
use crate::policy::PolicyTable;
use crate::services::pipeline::{assess_with_provider, SinkAssessment};
use crate::services::snapshot::SnapshotProvider;

/// One site entry in a batch manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSpec {
    pub name: String,
    /// Image path; relative paths are resolved against the manifest's directory.
    pub image: PathBuf,
    pub emissions_kg: f64,
    pub region: String,
}

/// A list of sites to assess together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteManifest {
    #[serde(default)]
    pub sites: Vec<SiteSpec>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported manifest format '{0}'; expected .yaml, .yml or .json")]
    UnsupportedFormat(String),
}

impl SiteManifest {
    /// Load a manifest, choosing the parser by extension, and resolve image
    /// paths relative to the manifest's directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let format = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
        let body = std::fs::read_to_string(path)
            .map_err(|source| ManifestError::Io { path: path.to_path_buf(), source })?;
        let mut manifest: SiteManifest = match format.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&body)?,
            "json" => serde_json::from_str(&body)?,
            other => return Err(ManifestError::UnsupportedFormat(other.to_string())),
        };

        if let Some(base) = path.parent() {
            for site in &mut manifest.sites {
                if site.image.is_relative() {
                    site.image = base.join(&site.image);
                }
            }
        }
        Ok(manifest)
    }
}

/// A site ready to assess: its snapshot source plus the operator inputs.
pub struct BatchSite {
    pub name: String,
    pub provider: Box<dyn SnapshotProvider>,
    pub emissions_kg: f64,
    pub region: String,
}

/// Per-site batch result. Exactly one of `assessment` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<SinkAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.assessment.is_some()
    }
}

/// Assess every site in parallel. Outcomes come back in input order and a
/// failing site does not stop the others.
pub fn run_batch(
    sites: &[BatchSite],
    table: &PolicyTable,
    calibration: &Calibration,
) -> Vec<BatchOutcome> {
    sites
        .par_iter()
        .map(|site| {
            match assess_with_provider(
                site.provider.as_ref(),
                site.emissions_kg,
                &site.region,
                table,
                calibration,
            ) {
                Ok(assessment) => {
                    BatchOutcome { name: site.name.clone(), assessment: Some(assessment), error: None }
                }
                Err(err) => {
                    tracing::warn!(site = %site.name, error = %err, "site assessment failed");
                    BatchOutcome { name: site.name.clone(), assessment: None, error: Some(err.to_string()) }
                }
            }
        })
        .collect()
}
