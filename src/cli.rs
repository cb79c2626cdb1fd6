use std::path::PathBuf;

use clap::{Parser, Subcommand};

use binevent_contingency::Metric;

/// Binary event table verification of forecasts against observations.
#[derive(Parser)]
#[command(
    name = "binevent",
    version,
    about = "Binary event table verification of forecasts against observations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Score every model across all cases.
    Score(ScoreArgs),
    /// Re-score one model over a range of forecast thresholds.
    Sweep(SweepArgs),
    /// Build NPC, mean and median ensembles and compare them with the reference model.
    Ensemble(EnsembleArgs),
}

/// Arguments for the `score` subcommand.
#[derive(clap::Args)]
pub struct ScoreArgs {
    /// Path to TOML run description.
    #[arg(short, long, default_value = "binevent.toml")]
    pub config: PathBuf,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `sweep` subcommand.
#[derive(clap::Args)]
pub struct SweepArgs {
    /// Path to TOML run description.
    #[arg(short, long, default_value = "binevent.toml")]
    pub config: PathBuf,

    /// Model to sweep.
    #[arg(short, long)]
    pub model: String,

    /// Number of forecast thresholds, starting at the observation threshold.
    #[arg(long, default_value_t = 21)]
    pub steps: usize,

    /// Largest fractional reduction of the forecast threshold.
    #[arg(long = "max-reduction", default_value_t = 0.9)]
    pub max_reduction: f64,

    /// Metric to pick a best threshold for (repeatable; all if omitted).
    #[arg(long = "metric", value_parser = parse_metric)]
    pub metrics: Vec<Metric>,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `ensemble` subcommand.
#[derive(clap::Args)]
pub struct EnsembleArgs {
    /// Path to TOML run description.
    #[arg(short, long, default_value = "binevent.toml")]
    pub config: PathBuf,

    /// Override `[ensemble].min_votes` from config.
    #[arg(long = "min-votes")]
    pub min_votes: Option<usize>,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_metric(name: &str) -> Result<Metric, String> {
    Metric::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        format!("unknown metric {name:?}, expected one of {}", known.join(", "))
    })
}
