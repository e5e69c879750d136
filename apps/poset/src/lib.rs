//! # poset
//!
//! Front end for `poset-core`: a line-oriented script language over a
//! poset `Registry`, its configuration, and the pieces the `poset` binary
//! is assembled from.

pub mod config;
pub mod error;
pub mod script;

pub use config::{Config, LogConfig, LogFormat, ScriptConfig};
pub use error::AppError;
