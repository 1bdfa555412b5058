//! Configuration management for nfsopts
//!
//! Loads configuration from:
//! 1. CLI argument `--config <path>` (if provided)
//! 2. Default path `/etc/nfsopts/config.toml` (falls back to defaults if not found)

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

use nfsopts::NfsVersion;

const DEFAULT_CONFIG_PATH: &str = "/etc/nfsopts/config.toml";

#[derive(Parser, Debug)]
#[command(name = "nfsopts")]
#[command(about = "Inspect and rewrite NFS mount options", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a mount option string
    Validate { options: String },

    /// Show the NFS version selected by a mount option string
    Version { options: String },

    /// Rewrite a mount option string to select a version (any, 3, 4, 4.1, 4.2)
    SetVersion {
        options: String,
        #[arg(value_parser = parse_version)]
        version: NfsVersion,
    },

    /// List the NFS entries of an fstab file
    List {
        /// fstab file, overrides the configured one
        #[arg(long)]
        fstab: Option<PathBuf>,
    },

    /// Validate the options of every NFS entry of an fstab file
    Check {
        /// fstab file, overrides the configured one
        #[arg(long)]
        fstab: Option<PathBuf>,
    },
}

fn parse_version(value: &str) -> Result<NfsVersion, String> {
    value.parse().map_err(|e: nfsopts::VersionError| e.to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub fstab: FstabConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FstabConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level. If not set, falls back to RUST_LOG env var, then "info"
    pub level: Option<String>,
}

impl Default for FstabConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/etc/fstab"),
        }
    }
}

impl LoggingConfig {
    /// Get log level with fallback: config -> RUST_LOG -> "info"
    pub fn effective_level(&self) -> String {
        match self.level.as_deref() {
            Some(level) => level.to_string(),
            None => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from the given file, the default file, or use defaults
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let (config_path, user_specified) = match path {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else if user_specified {
            // User specified --config but file doesn't exist
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        } else {
            Ok(Config::default())
        }
    }

    /// fstab file to read, preferring the one given on the command line
    pub fn fstab_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override.unwrap_or_else(|| self.fstab.path.clone())
    }
}
