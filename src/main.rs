//! Voxdump - Cache dump tool for Vox chat clients
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use voxdump::cli::{Cli, Commands};
use voxdump::error::VoxdumpResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> VoxdumpResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("voxdump=warn"),
        1 => EnvFilter::new("voxdump=info"),
        _ => EnvFilter::new("voxdump=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Dump(args) => voxdump::cli::commands::dump(args).await,
        Commands::Scan(args) => voxdump::cli::commands::scan(args).await,
    }
}
