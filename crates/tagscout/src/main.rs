//! tagscout command-line entry point
//!
//! Accepts both long flags and the legacy slash switches
//! (`/AF /DB /IF /OF /EF /WE /WC`).

use clap::Parser;
use std::process::ExitCode;
use tagscout_logging::{init_logging, LogConfig};
use tracing::warn;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "tagscout",
    version,
    about = "Find asset attributes bound to watch-listed data points"
)]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(flatten)]
    search: cli::search::SearchArgs,
}

fn main() -> ExitCode {
    let normalized = cli::legacy::normalize_args(std::env::args());
    let cli = Cli::parse_from(normalized.args);

    // Keep the guard alive so buffered log lines reach the file
    let _log_guard = match init_logging(LogConfig {
        app_name: "tagscout",
        verbose: cli.verbose,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    for arg in &normalized.invalid {
        warn!(argument = %arg, "Ignoring invalid argument");
    }

    match cli::search::run(cli.search) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}
