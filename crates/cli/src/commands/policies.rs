use anyhow::{bail, Result};
use serde::Serialize;
use sink_core::policy::PolicyRecord;

use crate::commands::load_policy_table;

#[derive(Serialize)]
struct PolicyListing<'a> {
    records: &'a [PolicyRecord],
    duplicate_regions: Vec<String>,
}

/// List the policy table and flag regions that appear on more than one row.
pub fn policies_command(path: &str, json: bool, check_unique: bool) -> Result<()> {
    let table = load_policy_table(path)?;
    let duplicates = table.duplicate_regions();

    if check_unique {
        if let Some((region, count)) = duplicates.iter().next() {
            bail!(
                "Policy table {path} lists region '{region}' {count} times ({} duplicated region(s) in total)",
                duplicates.len()
            );
        }
    }

    if json {
        let listing = PolicyListing {
            records: table.records(),
            duplicate_regions: duplicates.keys().cloned().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Policies ({}):", table.len());
    if table.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for record in table.records() {
        println!(
            "  - {}: {} [{}] {:.2} ha",
            record.region_name, record.policy_name, record.planting_species, record.target_area_hectares
        );
    }
    for (region, count) in &duplicates {
        println!("warning: region '{region}' appears {count} times; the first row is used");
    }
    Ok(())
}
