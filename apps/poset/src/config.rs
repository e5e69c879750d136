//! # Configuration
//!
//! Optional `poset.toml`:
//!
//! ```toml
//! [log]
//! format = "text"        # or "json"
//! filter = "poset=info"
//!
//! [script]
//! stop_on_failure = false
//! check_invariants = false
//! echo = true
//! ```
//!
//! `POSET_LOG_FORMAT` overrides `log.format`; `RUST_LOG` overrides
//! `log.filter` when the subscriber is built.

use crate::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "poset.toml";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "POSET_LOG_FORMAT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log: LogConfig,
    pub script: ScriptConfig,
}

/// Tracing output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "poset=info,poset_core=info".to_string(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse an environment override. Unknown values are ignored.
    #[must_use]
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Script interpreter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Stop at the first failed expectation.
    pub stop_on_failure: bool,
    /// Audit the touched poset after every mutating command.
    pub check_invariants: bool,
    /// Print each command next to its outcome.
    pub echo: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            stop_on_failure: false,
            check_invariants: false,
            echo: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `poset.toml` in the working
    /// directory is used if present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::ConfigNotFound(path.to_path_buf()));
                }
                Self::read(path)?
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(value) = std::env::var(LOG_FORMAT_ENV) {
            config.apply_log_format_override(&value);
        }

        Ok(config)
    }

    /// Apply a `POSET_LOG_FORMAT` value on top of the file settings.
    pub fn apply_log_format_override(&mut self, value: &str) {
        if let Some(format) = LogFormat::from_env_value(value) {
            self.log.format = format;
        }
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text, path)
    }
}
