//! Configuration for file-backed history storage.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for the file-backed ledger, loadable from TOML.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Location of the single history document.
    #[serde(default = "default_store_path")]
    store_path: PathBuf,

    /// Pretty-print the stored document.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

#[instrument]
fn default_store_path() -> PathBuf {
    PathBuf::from("matchbook.json")
}

#[instrument]
fn default_pretty() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            pretty: default_pretty(),
        }
    }
}

impl HistoryConfig {
    /// Creates a config storing history at the given path, with defaults
    /// for everything else.
    #[instrument(skip(store_path))]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            pretty: default_pretty(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(store_path = %config.store_path.display(), "Config loaded successfully");
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
