//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Run a single discrete-event simulation of one bus route and report its
/// headway-deviation and bunching statistics.
#[derive(Debug, Parser)]
#[command(name = "bunch-sim", version, about)]
pub struct Cli {
    /// Path to the run's `key=value` configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Path to the stops CSV fixture.
    #[arg(long, value_name = "FILE")]
    pub stops: PathBuf,

    /// Path to the signals CSV fixture.
    #[arg(long, value_name = "FILE")]
    pub signals: PathBuf,

    /// Optional path to write the per-sample headway-deviation CSV report.
    /// If omitted, only the end-of-run summary is printed.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the configuration file's RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (repeatable: `-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
