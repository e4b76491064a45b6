//! Greenfield CLI - track a liberation journey from the terminal.
//!
//! ```text
//! main() -> config -> init_tracing() -> FileRepository -> JourneyStore -> commands::run()
//! ```
//!
//! Logs go to `~/.greenfield/logs/greenfield.log`, never to stdout, so command
//! output stays clean for piping.

mod commands;
mod parse;

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use greenfield_config::GreenfieldConfig;
use greenfield_core::{FileRepository, JourneyStore, StoreOptions};

use crate::commands::{Command, Settings};

#[derive(Debug, Parser)]
#[command(name = "greenfield", version, about = "Track your liberation journey")]
struct Cli {
    /// Directory holding the journey snapshot (overrides the config file)
    #[arg(long, global = true, env = "GREENFIELD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(config_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::debug!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: drop logs rather than mix them into command output.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!("Failed to create log dir {}: {e}", parent.display()));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!("Failed to open log file {}: {e}", candidate.display()));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(config_path) = GreenfieldConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("greenfield.log"));
    }

    candidates.push(PathBuf::from(".greenfield").join("logs").join("greenfield.log"));

    candidates
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match GreenfieldConfig::load() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (GreenfieldConfig::default(), Some(e)),
    };
    init_tracing(config.log_filter());
    if let Some(e) = config_error {
        tracing::warn!("Using default configuration: {e}");
    }

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    let repo = FileRepository::new(&data_dir, config.snapshot_key());
    tracing::debug!(path = %repo.path().display(), "Opening journey");
    let mut store = JourneyStore::initialize(
        repo,
        StoreOptions {
            phase_policy: config.phase_policy(),
        },
    );

    let settings = Settings {
        analytics: config.analytics_enabled(),
    };
    let mut out = io::stdout().lock();
    commands::run(cli.command, &mut store, settings, &mut out)?;
    out.flush()?;
    Ok(())
}
