//! Atlas CLI - data quality checks for tabular files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log to stderr so `--json` output on stdout stays clean.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            json,
            cells,
            sigma,
            ddof,
            config,
        } => commands::check::run(file, json, cells, sigma, ddof, config),

        Commands::Export {
            file,
            output,
            format,
        } => commands::export::run(file, output, format),

        Commands::Edit {
            file,
            row,
            column,
            value,
            output,
            sigma,
            ddof,
            config,
        } => commands::edit::run(file, row, column, value, output, sigma, ddof, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
