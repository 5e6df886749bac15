//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rollcall - Discord reaction tally and attendance export bot
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "Discord reaction tally and attendance export bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./rollcall.toml if present)
    #[arg(short, long, global = true, env = "ROLLCALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Discord and serve reactions until interrupted
    Run,

    /// Load the configuration, print it with secrets masked, and list warnings
    CheckConfig,
}
