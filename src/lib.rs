//! Reelcut - highlight reel compiler.
//!
//! Compiles one highlight reel per subject from a timestamped event log by
//! driving an external media engine (ffmpeg) to cut and join clips.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod scratch;
pub mod timecode;

use clap::Parser;
use cli::{Cli, Command, CompileArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use engine::FfmpegEngine;
use events::EventSource;
use pipeline::{RunRequest, SubjectStatus};
use std::path::PathBuf;
use tracing::warn;

pub use error::{Error, Result};

/// Main entry point for the reelcut CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.compile.verbose, cli.compile.quiet);

    // Install Ctrl+C handler to clean up scratch directories on interrupt
    if let Err(e) = ctrlc::set_handler(|| {
        scratch::cleanup_all();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    // Default: compile highlight reels
    // Show usage if no source media provided
    let Some(source_media) = cli.source_media else {
        cli::help::print_usage_help();
        std::process::exit(0);
    };

    compile_reels(source_media, &cli.compile, &config)
}

/// Compile highlight reels for the given source media.
fn compile_reels(source_media: PathBuf, args: &CompileArgs, config: &Config) -> Result<()> {
    let events_arg = args.events.clone().ok_or_else(|| Error::MissingArgument {
        name: "events".to_string(),
    })?;
    let events = EventSource::parse(&events_arg)?;

    let group = args.group.clone().ok_or_else(|| Error::MissingArgument {
        name: "group".to_string(),
    })?;

    // Resolve settings, CLI flags override config defaults
    let padding = args.padding.unwrap_or(config.defaults.padding);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.defaults.output_dir.clone());
    let json = args.json || config.defaults.json;

    let request = RunRequest {
        source_media,
        events,
        group_id: group,
        padding,
        output_dir,
        dry_run: args.dry_run,
    };

    let engine = FfmpegEngine::new(config.engine.ffmpeg.clone())
        .with_extra_args(config.engine.extra_args.clone());

    let progress_enabled = !json && !args.quiet;
    let outcomes = match pipeline::run_with_progress(&request, &engine, progress_enabled) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            if json {
                output::emit_json_error(&e);
            }
            return Err(e);
        }
    };

    if json {
        output::emit_json_result(&output::run_payload(&request, &outcomes));
    } else {
        output::print_outcomes(&outcomes);
    }

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o.status, SubjectStatus::Failed { .. }))
        .count();
    if failed > 0 {
        return Err(Error::SubjectsFailed {
            failed,
            total: outcomes.len(),
        });
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr; stdout carries output paths and JSON results only.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
