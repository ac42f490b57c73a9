//! Karma CLI binary.
//!
//! Thin shell over the attribution engine: loads a touchpoint CSV, runs the
//! models, prints or exports results. No algorithmic logic lives here.

use clap::{Parser, Subcommand};
use karma::{AttributionEngine, BudgetRequest, optimize_budget};
use karma_data::{DatasetSchema, load_csv};
use karma_models::{AttributionModel, ShapleyModel, available_models, shapley_info};
use karma_output::{ExportFormat, Exporter, ReportBuilder};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "karma")]
#[command(about = "Karma: multi-touch marketing attribution", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all attribution models over a touchpoint dataset
    Analyze {
        /// Path to the touchpoint CSV file
        dataset: PathBuf,

        /// Column holding the user identifier
        #[arg(long, default_value = "cookie")]
        user_col: String,

        /// Column holding the channel name
        #[arg(long, default_value = "channel")]
        channel_col: String,

        /// Column holding the binary conversion flag
        #[arg(long, default_value = "conversion")]
        conversion_col: String,

        /// Column holding the conversion value
        #[arg(long, default_value = "conversion_value")]
        value_col: String,

        /// Output format (text, json, or markdown)
        #[arg(long, default_value = "text")]
        format: String,

        /// Export the combined table to a file (.csv or .json)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Also run the exact Shapley model (exponential in channel count)
        #[arg(long)]
        shapley: bool,
    },

    /// Allocate a budget proportionally to saved mean attributions
    Optimize {
        /// Total budget to distribute
        #[arg(long)]
        budget: f64,

        /// JSON file mapping channel to mean attribution weight
        #[arg(long)]
        attributions: PathBuf,

        /// JSON file mapping channel to spend cap (optional, sparse)
        #[arg(long)]
        limits: Option<PathBuf>,
    },

    /// List the available attribution models
    Models,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Analyze {
            dataset,
            user_col,
            channel_col,
            conversion_col,
            value_col,
            format,
            export,
            shapley,
        } => {
            let schema = DatasetSchema {
                user_col,
                channel_col,
                conversion_col,
                value_col,
            };
            let data = Arc::new(load_csv(&dataset, &schema)?);
            let engine = AttributionEngine::new(data.clone());

            let response = engine.run();
            if !response.success {
                return Err(format!(
                    "attribution run failed: {}",
                    response.error.as_deref().unwrap_or("unknown error")
                )
                .into());
            }
            let results = response.results.as_ref().expect("success implies results");
            let analytics = response.analytics.as_ref().expect("success implies analytics");

            match format.as_str() {
                "text" => {
                    print!("{}", results.to_ascii_table());
                    println!(
                        "\nInteractions: {}  Conversions: {}  Rate: {:.2}%  Users: {}",
                        analytics.total_interactions,
                        analytics.total_conversions,
                        analytics.conversion_rate_pct,
                        analytics.unique_users
                    );
                }
                "markdown" => print!("{}", results.to_markdown()),
                "json" => {
                    let report = ReportBuilder::new()
                        .dataset_rows(data.len() as u64)
                        .contents(serde_json::to_value(&response)?)
                        .build();
                    println!("{}", report.to_json()?);
                }
                other => return Err(format!("unknown format: {}", other).into()),
            }

            if shapley {
                let model = ShapleyModel::try_default()?;
                let table = model.compute(&data)?;
                println!("\nShapley values (exact coalition enumeration):");
                for (channel, weight) in &table {
                    println!(
                        "  {:<20} credit {:>10.4}  weightage {:>7.2}%",
                        channel, weight.credit, weight.weightage_pct
                    );
                }
            }

            if let Some(path) = export {
                let exporter = Exporter::new(ExportFormat::from_path(&path));
                exporter.export_combined(results, &path)?;
                println!("Exported combined results to {}", path.display());
            }

            Ok(())
        }

        Commands::Optimize {
            budget,
            attributions,
            limits,
        } => {
            let mean_attributions =
                serde_json::from_str(&std::fs::read_to_string(&attributions)?)?;
            let channel_limits = match limits {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
                None => Default::default(),
            };

            let response = optimize_budget(&BudgetRequest {
                budget,
                channel_limits,
                mean_attributions,
            });
            if !response.success {
                return Err(format!(
                    "budget optimization failed: {}",
                    response.error.as_deref().unwrap_or("unknown error")
                )
                .into());
            }

            let allocations = response.allocations.expect("success implies allocations");
            println!("Budget plan for {:.2}:", budget);
            for (channel, amount) in &allocations {
                println!("  {:<20} {:>12.2}", channel, amount);
            }
            let total: f64 = allocations.values().sum();
            println!("  {:<20} {:>12.2}", "Total", total);

            Ok(())
        }

        Commands::Models => {
            println!("Models in the default run:");
            for info in available_models() {
                println!("  {:<16} {:<14} {}", info.name, info.result_key, info.description);
            }
            let shapley = shapley_info();
            println!("\nOpt-in (--shapley):");
            println!(
                "  {:<16} {:<14} {}",
                shapley.name, shapley.result_key, shapley.description
            );
            Ok(())
        }
    }
}
