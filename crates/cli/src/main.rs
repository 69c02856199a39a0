use anyhow::Result;
use clap::{Parser, Subcommand};
use sink_core::emissions::ActivityData;
use sinkgap::commands::{
    analyze_command, assess_command, batch_command, calibration_init_command,
    calibration_show_command, emissions_command, policies_command, AssessArgs,
};

/// Carbon sink gap assistant.
///
/// This CLI is a thin wrapper around `sink-core` (exposed in code as `sink_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "sinkgap",
    version,
    about = "Estimate CO₂ sink capacity from map imagery and match the gap against afforestation policy",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). SINKGAP_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a map image and estimate its annual CO₂ absorption.
    Analyze {
        /// Path to the top-down map image (PNG or JPEG).
        #[arg(long)]
        image: String,

        /// Optional calibration file (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run the full pipeline: image analysis, sink gap, and policy verdict.
    Assess {
        /// Path to the top-down map image (PNG or JPEG).
        #[arg(long)]
        image: String,

        /// Reported emissions for the site, kg CO₂ per year.
        #[arg(long, allow_negative_numbers = true)]
        emissions: f64,

        /// Region (state) whose afforestation policy applies. Matched case-insensitively.
        #[arg(long)]
        region: String,

        /// Policy table CSV.
        #[arg(long)]
        policies: String,

        /// Optional calibration file (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write a JSON report (with image hash and timestamp) to this path.
        #[arg(long)]
        report: Option<String>,
    },

    /// List the policy table.
    Policies {
        /// Policy table CSV.
        #[arg(long)]
        policies: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Fail if any region appears on more than one row.
        #[arg(long, default_value_t = false)]
        check_unique: bool,
    },

    /// Estimate a site's annual emissions from activity data.
    Emissions {
        /// Diesel burned, litres.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        diesel: f64,

        /// Electricity consumed, kWh.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        electricity: f64,

        /// Methane released, kg.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        methane: f64,

        /// Coal produced, tonnes.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        coal: f64,

        /// Transport distance, km.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        distance: f64,

        /// Transported weight, tonnes.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        weight: f64,

        /// Number of workers, for per-capita intensity.
        #[arg(long, requires = "hours")]
        workers: Option<u32>,

        /// Working hours per worker, for per-capita intensity.
        #[arg(long, requires = "workers")]
        hours: Option<f64>,

        /// Sequestration rate (kg CO₂ per hectare per year) to size afforestation land.
        #[arg(long)]
        sequestration_rate: Option<f64>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Assess every site listed in a YAML/JSON manifest, in parallel.
    Batch {
        /// Site manifest (.yaml, .yml or .json).
        #[arg(long)]
        manifest: String,

        /// Policy table CSV.
        #[arg(long)]
        policies: String,

        /// Optional calibration file (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Inspect or scaffold calibration files.
    Calibration {
        #[command(subcommand)]
        action: CalibrationAction,
    },
}

#[derive(Subcommand, Debug)]
enum CalibrationAction {
    /// Print the calibration in effect.
    Show {
        /// Optional calibration file to merge over the defaults.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of YAML.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the default calibration to a file.
    Init {
        /// Destination (.yaml, .yml or .json).
        #[arg(long)]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    sinkgap::init_logging(cli.verbose);

    match cli.command {
        Command::Analyze { image, config, json } => {
            analyze_command(&image, config.as_deref(), json)?
        }
        Command::Assess { image, emissions, region, policies, config, json, report } => {
            let args = AssessArgs { image, emissions_kg: emissions, region, policies, config };
            assess_command(&args, json, report.as_deref())?
        }
        Command::Policies { policies, json, check_unique } => {
            policies_command(&policies, json, check_unique)?
        }
        Command::Emissions {
            diesel,
            electricity,
            methane,
            coal,
            distance,
            weight,
            workers,
            hours,
            sequestration_rate,
            json,
        } => {
            let activity = ActivityData {
                diesel_litres: diesel,
                electricity_kwh: electricity,
                methane_kg: methane,
                coal_tonnes: coal,
                transport_distance_km: distance,
                transport_weight_tonnes: weight,
            };
            emissions_command(&activity, workers, hours, sequestration_rate, json)?
        }
        Command::Batch { manifest, policies, config, json } => {
            batch_command(&manifest, &policies, config.as_deref(), json)?
        }
        Command::Calibration { action } => match action {
            CalibrationAction::Show { config, json } => {
                calibration_show_command(config.as_deref(), json)?
            }
            CalibrationAction::Init { path, force } => calibration_init_command(&path, force)?,
        },
    }

    Ok(())
}
