use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sirgen stochastic epidemic trajectory generator.
#[derive(Parser)]
#[command(
    name = "sirgen",
    version,
    about = "Stochastic SIR/SIS epidemic trajectory generator"
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
    /// Simulate epidemic trajectories and write them to CSV.
    Simulate(SimulateArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sirgen.toml")]
    pub config: PathBuf,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override base RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override number of Monte Carlo replicates from config.
    #[arg(short = 'n', long)]
    pub replicates: Option<u32>,
}
