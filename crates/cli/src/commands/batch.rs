use std::path::Path;

use anyhow::{bail, Context, Result};
use sink_core::services::{run_batch, BatchOutcome, BatchSite, SiteManifest};

use crate::commands::{load_calibration, load_policy_table, print_gap, print_verdict};
use crate::snapshot::ImageFileSnapshot;

/// Assess every site listed in a manifest.
pub fn run_manifest(manifest: &str, policies: &str, config: Option<&str>) -> Result<Vec<BatchOutcome>> {
    let calibration = load_calibration(config)?;
    let table = load_policy_table(policies)?;
    let manifest = SiteManifest::load(Path::new(manifest))
        .with_context(|| format!("Failed to load site manifest {manifest}"))?;

    let sites: Vec<BatchSite> = manifest
        .sites
        .into_iter()
        .map(|site| BatchSite {
            name: site.name,
            provider: Box::new(ImageFileSnapshot::new(&site.image)),
            emissions_kg: site.emissions_kg,
            region: site.region,
        })
        .collect();
    tracing::info!(sites = sites.len(), "running batch assessment");

    Ok(run_batch(&sites, &table, &calibration))
}

pub fn batch_command(manifest: &str, policies: &str, config: Option<&str>, json: bool) -> Result<()> {
    let outcomes = run_manifest(manifest, policies, config)?;
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("Sites ({}):", outcomes.len());
        for outcome in &outcomes {
            println!();
            println!("== {} ==", outcome.name);
            match (&outcome.assessment, &outcome.error) {
                (Some(assessment), _) => {
                    print_gap(
                        assessment.reported_emissions_kg,
                        assessment.total_absorption_kg(),
                        assessment.gap_kg,
                    );
                    print_verdict(&assessment.verdict);
                }
                (None, Some(err)) => println!("error: {err}"),
                (None, None) => println!("error: no result"),
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} site(s) failed", outcomes.len());
    }
    Ok(())
}
