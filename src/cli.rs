//! Command-line interface for checkmate.

use checkmate_client::{Revision, Theme};
use clap::{Args, Parser, Subcommand};

/// Checkmate - play chess against a remote server
#[derive(Parser, Debug)]
#[command(name = "checkmate")]
#[command(about = "Terminal chess client for a remote authoritative server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to client config (TOML). Missing default file means defaults.
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Where to connect; overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectArgs {
    /// Server host, with or without scheme
    #[arg(long)]
    pub host: Option<String>,

    /// Server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Route-style connection query, e.g. "host=localhost&port=3000"
    #[arg(long, conflicts_with_all = ["host", "port"])]
    pub query: Option<String>,

    /// Server protocol revision (prototype, envelope, unified, compact)
    #[arg(long)]
    pub protocol: Option<Revision>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Connection overrides
        #[command(flatten)]
        connect: ConnectArgs,

        /// Board theme (light or dark)
        #[arg(long)]
        theme: Option<Theme>,
    },

    /// Print the current board and legal moves once
    Show {
        /// Connection overrides
        #[command(flatten)]
        connect: ConnectArgs,
    },
}
