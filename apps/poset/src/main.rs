//! # poset - Partial Order Scripting
//!
//! Runs poset scripts against an in-memory registry.
//!
//! ## Usage
//!
//! ```bash
//! # Run one or more scripts, failing if any `=>` expectation fails
//! poset run scenario.poset
//!
//! # Interactive session
//! poset repl
//!
//! # Syntax check only
//! poset check scenario.poset
//! ```

mod cli;

use clap::Parser;
use poset::{Config, LogConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LogConfig::default());
            tracing::error!("Error: {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config.log);

    // Execute command
    if let Err(e) = cli::execute(cli, config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries
/// command outcomes.
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.filter.as_str().into());

    match log.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
