//! # poset CLI Module
//!
//! ## Available Commands
//!
//! - `run` - Execute script files, each against a fresh registry
//! - `repl` - Execute commands read from standard input
//! - `check` - Parse script files without executing them

mod commands;

use clap::{Parser, Subcommand};
use poset::{AppError, Config};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// poset - named strict partial orders from the command line
#[derive(Parser, Debug)]
#[command(name = "poset")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: ./poset.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress per-command output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (one object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Audit the touched poset after every mutating command
    #[arg(long, global = true)]
    pub check_invariants: bool,

    /// Stop at the first failed expectation
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run script files
    Run {
        /// Script files, each run against its own registry
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Read commands from standard input until EOF
    Repl,

    /// Parse script files and report syntax errors
    Check {
        /// Script files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and loaded configuration.
pub fn execute(cli: Cli, mut config: Config) -> Result<(), AppError> {
    // Flags only ever switch behaviour on.
    config.script.check_invariants |= cli.check_invariants;
    config.script.stop_on_failure |= cli.fail_fast;

    let output = OutputOptions {
        json: cli.json,
        quiet: cli.quiet,
        echo: config.script.echo,
    };

    match cli.command {
        Commands::Run { files } => cmd_run(&files, &output, &config.script),
        Commands::Repl => cmd_repl(&output, &config.script),
        Commands::Check { files } => cmd_check(&files, &output),
    }
}
