//! Configuration management for the MHTML language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration file
//! - Logger setup

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::validation::engine::{ValidationOptions, DEFAULT_MAX_NESTING_DEPTH};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Options shared by every binary
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Configuration file to read instead of the per-user default
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Deepest element nesting the validator descends into
    #[arg(long, help = "Maximum element nesting depth to validate")]
    pub max_nesting_depth: Option<usize>,

    /// Log level for the language server
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Command-line arguments for the MHTML language server
#[derive(Debug, Parser)]
#[command(name = "mhtml-ls")]
#[command(about = "Language server for MHTML documents")]
#[command(version)]
pub struct ServerArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Contents of a configuration file
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub max_nesting_depth: Option<usize>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Log filter, e.g. `info` or `mhtml_language_server=debug`
    pub log_level: String,
    pub max_nesting_depth: usize,
    /// Configuration file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            config_file: None,
        }
    }
}

impl Config {
    /// Create configuration from the server's command line
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(ServerArgs::parse().config)
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// Command-line values win over the file, the file wins over defaults.
    /// An explicitly named file must exist; the per-user default may not.
    pub fn from_args(args: ConfigArgs) -> Result<Self> {
        let (file, config_file) = match args.config {
            Some(path) => (FileConfig::load(&path)?, Some(path)),
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => (FileConfig::load(&path)?, Some(path)),
                None => (FileConfig::default(), None),
            },
        };

        let max_nesting_depth = args
            .max_nesting_depth
            .or(file.max_nesting_depth)
            .unwrap_or(DEFAULT_MAX_NESTING_DEPTH);
        if max_nesting_depth == 0 {
            anyhow::bail!("max_nesting_depth must be at least 1");
        }

        Ok(Config {
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            max_nesting_depth,
            config_file,
        })
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Install the global logger. Output goes to stderr; stdout belongs to
    /// the LSP transport. `RUST_LOG` overrides the configured level.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        if env_logger::Builder::from_env(env)
            .target(env_logger::Target::Stderr)
            .try_init()
            .is_err()
        {
            log::debug!("Logger already initialized");
        }
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// `<user config dir>/mhtml-ls/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mhtml-ls").join("config.toml"))
}
