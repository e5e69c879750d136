//! # Application Errors
//!
//! Failures of the front end itself. Rejected poset operations are not
//! errors here: they are ordinary `false` outcomes.

use poset_core::InvariantViolation;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or running scripts.
#[derive(Debug, Error)]
pub enum AppError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be decoded.
    #[error("Invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Config file not found: {0:?}")]
    ConfigNotFound(PathBuf),

    /// A script line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invariant checking found a corrupted poset.
    #[error("line {line}: invariant violated: {source}")]
    Invariant {
        line: usize,
        #[source]
        source: InvariantViolation,
    },

    /// Outcome serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more `=>` expectations did not hold.
    #[error("{failed} expectation(s) failed")]
    ExpectationsFailed { failed: usize },
}

impl AppError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
