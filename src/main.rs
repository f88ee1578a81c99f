//! sanicost CLI - economic cost of inadequate sanitation
//!
//! Command-line interface for evaluating and simulating the cost model.

use std::process::ExitCode;

use sanicost::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("sanicost=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run_cli(args)
}
