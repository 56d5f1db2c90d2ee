//! CLI subcommands.

pub mod config;
pub mod edit;
pub mod parse;
pub mod scan;

use std::path::{Path, PathBuf};

use tracing::debug;

use cardscan_core::CardScanConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscan")
        .join("config.json")
}

/// Configuration file to act on: `--config` when given, else the default.
pub fn config_file(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<CardScanConfig> {
    if let Some(path) = config_path {
        return Ok(CardScanConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(CardScanConfig::from_file(&default_path)?)
    } else {
        Ok(CardScanConfig::default())
    }
}
