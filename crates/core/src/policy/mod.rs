//! Regional afforestation policy records and the table they live in.
//!
//! The table is reference data: ordered, read-only, and validated once at
//! ingestion. CSV files use the headers of the state policy sheet
//! (`State, Policy Name, Planting Species, Target Area (in hectares)`);
//! snake_case headers are accepted too.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ensure_non_negative, SinkError};

/// One row of the policy table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    #[serde(rename(deserialize = "State"), alias = "region_name", alias = "region")]
    pub region_name: String,
    #[serde(rename(deserialize = "Policy Name"), alias = "policy_name")]
    pub policy_name: String,
    /// Accepted for reporting; not used to adjust the absorption rate.
    #[serde(rename(deserialize = "Planting Species"), alias = "planting_species")]
    pub planting_species: String,
    #[serde(rename(deserialize = "Target Area (in hectares)"), alias = "target_area_hectares")]
    pub target_area_hectares: f64,
}

impl PolicyRecord {
    pub fn new(
        region_name: impl Into<String>,
        policy_name: impl Into<String>,
        planting_species: impl Into<String>,
        target_area_hectares: f64,
    ) -> Self {
        Self {
            region_name: region_name.into(),
            policy_name: policy_name.into(),
            planting_species: planting_species.into(),
            target_area_hectares,
        }
    }

    /// Case-insensitive exact comparison against a region name.
    pub fn matches_region(&self, region: &str) -> bool {
        self.region_name.trim().to_lowercase() == region.trim().to_lowercase()
    }

    fn validate(&self) -> Result<(), SinkError> {
        if self.region_name.trim().is_empty() {
            return Err(SinkError::EmptyRegionName);
        }
        if !ensure_non_negative(self.target_area_hectares) {
            return Err(SinkError::InvalidTargetArea {
                region: self.region_name.clone(),
                hectares: self.target_area_hectares,
            });
        }
        Ok(())
    }
}

/// Ordered, validated sequence of policy records.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PolicyTable {
    records: Vec<PolicyRecord>,
}

impl PolicyTable {
    /// An empty table; every lookup against it is a miss.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and wrap records, preserving their order.
    pub fn from_records(records: Vec<PolicyRecord>) -> Result<Self, SinkError> {
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows whose region matches `region`, in table order.
    pub fn find_all<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a PolicyRecord> + 'a {
        self.records.iter().filter(move |r| r.matches_region(region))
    }

    /// First row whose region matches `region`.
    pub fn find_first(&self, region: &str) -> Option<&PolicyRecord> {
        self.records.iter().find(|r| r.matches_region(region))
    }

    /// Regions (lowercased) that appear on more than one row, with their row counts.
    pub fn duplicate_regions(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.region_name.trim().to_lowercase()).or_default() += 1;
        }
        counts.retain(|_, count| *count > 1);
        counts
    }

    /// Fail if any region appears more than once.
    pub fn ensure_unique_regions(&self) -> Result<(), SinkError> {
        match self.duplicate_regions().into_iter().next() {
            Some((region, count)) => Err(SinkError::AmbiguousRegion { region, count }),
            None => Ok(()),
        }
    }

    /// Parse a CSV body. An input with headers and no rows yields an empty table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PolicyLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<PolicyRecord>().enumerate() {
            // Header is line 1.
            let record = row.map_err(|source| PolicyLoadError::Row { line: index + 2, source })?;
            records.push(record);
        }
        tracing::debug!(rows = records.len(), "parsed policy table");
        Ok(Self::from_records(records)?)
    }
}

/// Error type for policy table ingestion.
#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("Failed to open policy table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed policy row at line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Invalid(#[from] SinkError),
}

/// Source of the policy table handed to the matcher.
pub trait PolicyRepository {
    fn load(&self) -> Result<PolicyTable, PolicyLoadError>;
}

/// Policy table stored as a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvPolicyFile {
    pub path: PathBuf,
}

impl CsvPolicyFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl PolicyRepository for CsvPolicyFile {
    fn load(&self) -> Result<PolicyTable, PolicyLoadError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|source| PolicyLoadError::Io { path: self.path.clone(), source })?;
        PolicyTable::from_csv_reader(file)
    }
}

impl PolicyRepository for PolicyTable {
    fn load(&self) -> Result<PolicyTable, PolicyLoadError> {
        Ok(self.clone())
    }
}
