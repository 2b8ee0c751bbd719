//! Configuration management for the CLI.
//!
//! The file holds terminal settings plus the same `[brain]` table the
//! server reads.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sophia_brain::BrainConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Terminal settings
    #[serde(default)]
    pub settings: Settings,

    /// Orchestrator settings
    #[serde(default)]
    pub brain: BrainConfig,
}

/// Terminal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text and tables
    Table,
    /// JSON
    Json,
}

impl Config {
    /// Directory for CLI state (`~/.sophia`)
    pub fn dir() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sophia"))
    }

    /// Default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load an explicit file, or the default file when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.brain.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.brain.max_history, 50);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[settings]
color = false

[brain]
max_history = 10
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.brain.max_history, 10);
        assert_eq!(config.brain.max_snapshots, 10);
    }

    #[test]
    fn test_invalid_brain_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[brain]\nmax_history = 0").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/sophia.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
