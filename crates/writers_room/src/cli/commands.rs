//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use writers_room::ExportFormat;

/// Writers' Room - a director, a cast of actors and a script analyst write a screenplay
#[derive(Parser, Debug)]
#[command(name = "writers-room")]
#[command(about = "Multi-agent screenplay writing from a single theme", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a screenplay from a theme
    Write(WriteArgs),

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to load instead of the default locations
        #[arg(long, env = "WRITERS_ROOM_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Arguments for `write`
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Story theme
    #[arg(short, long)]
    pub theme: String,

    /// Export format (fountain or text)
    #[arg(long, default_value_t = ExportFormat::Fountain)]
    pub format: ExportFormat,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file to load instead of the default locations
    #[arg(long, env = "WRITERS_ROOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not stream agent activity to stderr
    #[arg(short, long)]
    pub quiet: bool,
}
