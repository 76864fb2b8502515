use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Autoregressive simulation and scoring for behavioral time series.
#[derive(Parser)]
#[command(
    name = "moseq",
    version,
    about = "Simulate and score AR(k) models with full-covariance Gaussian noise"
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
    /// Simulate series from the configured AR parameters and score them.
    Simulate(SimulateArgs),
    /// Draw AR parameters from an MNIW prior and score a series drawn from them.
    SampleParams(SampleArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "moseq.toml")]
    pub config: PathBuf,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of simulated series.
    #[arg(long)]
    pub n_series: Option<usize>,

    /// Override the number of simulated steps per series.
    #[arg(long)]
    pub n_steps: Option<usize>,
}

/// Arguments for the `sample-params` subcommand.
#[derive(clap::Args)]
pub struct SampleArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "moseq.toml")]
    pub config: PathBuf,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
