//! # CLI Command Implementations

use poset::AppError;
use poset::config::ScriptConfig;
use poset::script::{Interpreter, RunReport, Step, parse_line, parse_script};
use std::io::BufRead;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum script file size (16 MB).
///
/// Scripts are read whole before parsing.
const MAX_SCRIPT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a script file after checking its size.
fn read_script(path: &Path) -> Result<String, AppError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_SCRIPT_FILE_SIZE {
        return Err(AppError::Io(std::io::Error::other(format!(
            "Script {:?} is {} bytes, limit is {} bytes",
            path,
            metadata.len(),
            MAX_SCRIPT_FILE_SIZE
        ))));
    }
    Ok(std::fs::read_to_string(path)?)
}

// =============================================================================
// OUTPUT
// =============================================================================

/// How outcomes are printed.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
    pub echo: bool,
}

fn print_step(step: &Step, output: &OutputOptions) -> Result<(), AppError> {
    if output.quiet {
        return Ok(());
    }
    if output.json {
        println!("{}", serde_json::to_string(step)?);
        return Ok(());
    }

    let failure = step
        .failure
        .as_ref()
        .map(|f| format!("  (expected {})", f.expected))
        .unwrap_or_default();
    if output.echo {
        println!("{:>4}  {:<6} {}{}", step.line, step.command, step.outcome, failure);
    } else {
        println!("{}{}", step.outcome, failure);
    }
    Ok(())
}

fn print_summary(file: &Path, report: &RunReport, output: &OutputOptions) -> Result<(), AppError> {
    if output.json {
        let summary = serde_json::json!({
            "file": file.to_string_lossy(),
            "executed": report.executed,
            "failed": report.failures.len(),
            "stopped_early": report.stopped_early,
        });
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!(
        "{}: {} command(s), {} failed expectation(s){}",
        file.display(),
        report.executed,
        report.failures.len(),
        if report.stopped_early { ", stopped early" } else { "" }
    );
    Ok(())
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run each script against its own registry.
pub fn cmd_run(
    files: &[PathBuf],
    output: &OutputOptions,
    script: &ScriptConfig,
) -> Result<(), AppError> {
    let mut failed = 0;

    for file in files {
        let source = read_script(file)?;
        let lines = parse_script(&source)?;
        tracing::info!(file = %file.display(), commands = lines.len(), "running script");

        let mut interpreter = Interpreter::new(script.clone());
        let report = interpreter.run(&lines, |step| print_step(step, output))?;
        failed += report.failures.len();
        print_summary(file, &report, output)?;
    }

    if failed > 0 {
        return Err(AppError::ExpectationsFailed { failed });
    }
    Ok(())
}

// =============================================================================
// REPL COMMAND
// =============================================================================

/// Execute commands from stdin. Syntax errors are reported and skipped.
pub fn cmd_repl(output: &OutputOptions, script: &ScriptConfig) -> Result<(), AppError> {
    let mut interpreter = Interpreter::new(script.clone());
    let mut report = RunReport::default();
    let stdin = std::io::stdin();

    for (index, text) in stdin.lock().lines().enumerate() {
        let text = text?;
        let line = match parse_line(index + 1, &text) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        let step = interpreter.run_line(&line)?;
        print_step(&step, output)?;
        report.executed += 1;
        if let Some(failure) = step.failure {
            report.failures.push(failure);
            if script.stop_on_failure {
                report.stopped_early = true;
                break;
            }
        }
    }

    tracing::info!(executed = report.executed, "session closed");
    report.into_result().map(|_| ())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Parse every file, reporting the first syntax error in each.
pub fn cmd_check(files: &[PathBuf], output: &OutputOptions) -> Result<(), AppError> {
    let mut first_error = None;

    for file in files {
        let result = read_script(file).and_then(|source| parse_script(&source));
        let (ok, detail) = match &result {
            Ok(lines) => (true, format!("{} command(s)", lines.len())),
            Err(e) => (false, e.to_string()),
        };

        if output.json {
            let entry = serde_json::json!({
                "file": file.to_string_lossy(),
                "ok": ok,
                "detail": detail,
            });
            println!("{}", serde_json::to_string(&entry)?);
        } else if !output.quiet {
            println!("{}: {}", file.display(), detail);
        }

        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    first_error.map_or(Ok(()), Err)
}
