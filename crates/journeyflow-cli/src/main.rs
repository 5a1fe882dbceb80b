mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use journeyflow_core::{HttpJourneyApi, JourneyApi};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::CliConfig::load();
    let _guard = init_logging(cli.verbose)?;

    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let client_config = config.client_config(cli.api_url.as_deref());
    tracing::debug!(base_url = %client_config.base_url, "Using journey API");
    let api: Arc<dyn JourneyApi> =
        Arc::new(HttpJourneyApi::new(&client_config).context("Failed to create API client")?);
    let autosave = config.autosave_config();
    let format = cli.format;

    match cli.command {
        Commands::Completions { .. } => Ok(()),
        Commands::Journey { command } => {
            commands::journey::run(api, command, &autosave, format).await
        }
        Commands::Step { command } => commands::step::run(api, command, &autosave, format).await,
        Commands::Connect(args) => {
            commands::connection::connect(api, args, &autosave, format).await
        }
        Commands::Disconnect(args) => {
            commands::connection::disconnect(api, args, &autosave, format).await
        }
        Commands::Design { journey, cascade } => {
            commands::design::run(api, journey, &autosave, cascade).await
        }
    }
}

/// Logs always go to a daily file so they never interleave with command output.
fn init_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("journeyflow")
        .filename_suffix("log")
        .build(&log_dir)
        .with_context(|| format!("Failed to open log directory {}", log_dir.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("journeyflow")
        .join("logs")
}
