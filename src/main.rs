//! @dose
//! purpose: This is the CLI entry point for jscomments. It parses command-line arguments using
//!     clap, sets up logging, determines the project root directory, and dispatches to the
//!     command handler.
//!
//! when-editing:
//!     - !All command handlers are imported from the jscomments crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - Logs go to stderr so stdout carries only extraction output
//!     - The process exits with 0 on success, 1 on any error
//!
//! gotchas:
//!     - RUST_LOG takes precedence over --verbose when set

use anyhow::Context;
use clap::Parser;
use jscomments::cli::{Cli, Commands};
use jscomments::commands::run_extract;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Extract(args) => run_extract(&args, &root),
    }
}
