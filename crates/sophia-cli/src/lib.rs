//! Sophia CLI library.
//!
//! Terminal front end for the conversational orchestrator: argument
//! parsing, configuration loading, output formatting and the REPL. The
//! orchestrator runs in-process.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use repl::{load_graph, parse_repl_command, ReplCommand, Session};
