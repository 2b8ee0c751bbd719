//! CLI argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sophia - talk to the graph-building assistant from a terminal.
#[derive(Debug, Parser)]
#[command(name = "sophia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SOPHIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session id to use instead of a fresh one
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Graph document (JSON) sent with every message
    #[arg(short, long, global = true)]
    pub graph: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text and tables (default)
    Table,
    /// Raw JSON responses
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single message and print the response
    Ask(AskArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Message text; words are joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
