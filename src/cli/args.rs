//! CLI argument definitions using clap derive

use crate::platform::Platform;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Voxdump - Cache dump and file-type recovery for Vox chat clients
///
/// Locates the cache directory of every installed Vox build, copies the
/// contents into a timestamped dump and identifies copied files by
/// their magic bytes.
#[derive(Parser, Debug)]
#[command(name = "voxdump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy every installed build's cache into a timestamped dump
    Dump(DumpArgs),

    /// List installed builds and their cache contents without copying
    Scan(ScanArgs),
}

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Root directory dumps are written under
    #[arg(short, long, default_value = "dump")]
    pub output: PathBuf,

    /// Skip the confirmation pause before copying
    #[arg(short, long)]
    pub yes: bool,

    /// Override platform detection
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Override the home directory caches are resolved against
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Skip file-type identification after copying
    #[arg(long)]
    pub no_classify: bool,
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Override platform detection
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Override the home directory caches are resolved against
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for the scan command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one present variant per line)
    Plain,
}
