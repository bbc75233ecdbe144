use std::path::PathBuf;

use arena_sdk::model::Address;
use clap::Parser;
use commands::{Command, Commands, Context};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Command-line interface for a locally persisted arena.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(long, short, env = "ARENA_CONFIG_PATH", global = true)]
    config: Option<PathBuf>,
    /// Path to the state file, overriding the config.
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Unix timestamp to run at instead of the wall clock.
    #[arg(long, global = true)]
    now: Option<i64>,
    /// Address acting as the caller, overriding the config.
    #[arg(long, global = true)]
    caller: Option<Address>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(state) = cli.state {
        config.set_state_path(state);
    }
    if let Some(caller) = cli.caller {
        config.set_caller(caller);
    }
    tracing::debug!(?config, path = %config_path.display(), "loaded config");

    let ctx = Context::new(&config_path, &config, cli.now);
    cli.command.execute(ctx).await
}
