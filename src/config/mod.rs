use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::currency::DEFAULT_SYMBOL;

pub const CONFIG_ENV: &str = "EXPENSE_TRACKER_CONFIG";
pub const DATA_FILE_ENV: &str = "EXPENSE_TRACKER_FILE";
pub const DEFAULT_DATA_FILE: &str = "expenses.json";
const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed configuration `{path}`: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// User preferences for the tracker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Expense file used when no `--file` override is given.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: Self::default_currency_symbol(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        DEFAULT_SYMBOL.into()
    }

    /// Picks the backing file: explicit override, then configured file, then `expenses.json`.
    pub fn resolve_data_file(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

/// Reads [`Config`] from a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$EXPENSE_TRACKER_CONFIG`, falling back to `~/.expense_tracker/config.json`.
    pub fn default_location() -> Self {
        if let Some(custom) = env::var_os(CONFIG_ENV) {
            return Self::new(PathBuf::from(custom));
        }
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME);
        Self::new(base.join(CONFIG_FILE))
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Malformed {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }
}
