use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sink_core::Calibration;

use crate::commands::load_calibration;

/// Print the calibration in effect (defaults merged with an optional file).
pub fn calibration_show_command(config: Option<&str>, json: bool) -> Result<()> {
    let calibration = load_calibration(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&calibration)?);
    } else {
        print!("{}", serde_yaml::to_string(&calibration)?);
    }
    Ok(())
}

/// Write the default calibration to `path` as YAML or JSON, by extension.
pub fn calibration_init_command(path: &str, force: bool) -> Result<()> {
    let target = Path::new(path);
    if target.exists() && !force {
        return Err(anyhow!(
            "Calibration file already exists at {}; pass --force to overwrite",
            target.display()
        ));
    }

    let calibration = Calibration::default();
    let ext = target.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    let body = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::to_string(&calibration)?,
        "json" => serde_json::to_string_pretty(&calibration)?,
        other => {
            return Err(anyhow!("Unsupported calibration format '{other}'; use .yaml, .yml or .json"))
        }
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(target, body)
        .with_context(|| format!("Failed to write calibration to {}", target.display()))?;

    println!("Wrote default calibration to {}", target.display());
    Ok(())
}
