#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `hostel-server`: HTTP front of the hostel maintenance complaint service.

mod config;
mod server;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "hostel-server", version, about = "Hostel maintenance complaint service")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the REST API (default).
    Run,
    /// Apply database migrations and exit.
    Migrate,
    /// Print the effective configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    init_tracing(&cfg.logging)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => server::run(cfg).await,
        Command::Migrate => server::migrate(&cfg.database).await,
        Command::CheckConfig => {
            let rendered =
                serde_json::to_string_pretty(&cfg).context("failed to render configuration")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn init_tracing(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if cfg.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}
