//! Checkmate - terminal chess client
//!
//! Connects to a remote authoritative chess server and plays through it.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use checkmate_client::{ClientConfig, ConnectParams, Game, RemoteDriver};
use clap::Parser;
use cli::{Cli, Command, ConnectArgs};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "checkmate.toml";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Play { connect, theme } => {
            let mut config = apply_overrides(config, &connect)?;
            if let Some(theme) = theme {
                config = config.with_theme(theme);
            }
            runtime.block_on(tui::run_tui(config))
        }
        Command::Show { connect } => {
            let config = apply_overrides(config, &connect)?;
            runtime.block_on(run_show(config))
        }
    }
}

/// Loads the config file; a missing default file falls back to defaults.
fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    if !explicit && !path.exists() {
        return Ok(ClientConfig::default());
    }
    ClientConfig::from_file(&path).with_context(|| format!("loading {}", path.display()))
}

/// Layers CLI flags over the file configuration.
fn apply_overrides(config: ClientConfig, args: &ConnectArgs) -> Result<ClientConfig> {
    let mut config = match &args.query {
        Some(query) => {
            let params = ConnectParams::from_query(query)
                .context("connection query not ready, enter host and port again")?;
            config.with_address(Some(params.host().clone()), Some(*params.port()))
        }
        None => config.with_address(args.host.clone(), args.port),
    };
    if let Some(protocol) = args.protocol {
        config = config.with_protocol(protocol);
    }
    Ok(config)
}

/// Prints one snapshot of the game to stdout.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
async fn run_show(config: ClientConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Fetching game snapshot");
    let driver = RemoteDriver::connect(&config.connect_params(), config.driver_options())
        .await
        .context("server not ready, check host and port")?;
    let state = driver.state();
    print!("{}", tui::render_text(&state));
    Ok(())
}
