//! CLI argument definitions.

use crate::constants::MAX_PADDING;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Compile per-subject highlight reels from a timestamped event log.
#[derive(Debug, Parser)]
#[command(name = "reelcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source media file to cut highlights from.
    pub source_media: Option<PathBuf>,

    /// Common options for compilation.
    #[command(flatten)]
    pub compile: CompileArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the compile command.
#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Path to an event CSV file or a shared spreadsheet URL.
    #[arg(short, long, env = "REELCUT_EVENTS")]
    pub events: Option<String>,

    /// Recording group to compile (matches the groupId column).
    #[arg(short, long, env = "REELCUT_GROUP")]
    pub group: Option<String>,

    /// Seconds of context added around each event.
    #[arg(short, long, value_parser = parse_padding, env = "REELCUT_PADDING")]
    pub padding: Option<f64>,

    /// Directory where compiled reels are written (default: current directory).
    #[arg(short, long, env = "REELCUT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Show what would be generated without invoking the media engine.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON result on stdout.
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate padding value.
fn parse_padding(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=MAX_PADDING).contains(&value) {
        return Err(format!(
            "padding must be between 0.0 and {MAX_PADDING} seconds, got {value}"
        ));
    }

    Ok(value)
}
