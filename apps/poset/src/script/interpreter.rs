//! Executes parsed script lines against one owned `Registry`.

use super::{Command, Expectation, HandleRef, Line};
use crate::AppError;
use crate::config::ScriptConfig;
use poset_core::{Poset, PosetHandle, PosetSnapshot, Registry};
use serde::Serialize;
use std::fmt;

/// Handle used when `$` is referenced before any `new`. Never live.
const NO_HANDLE: PosetHandle = PosetHandle(0);

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Handle(PosetHandle),
    Bool(bool),
    Count(u64),
    Unit,
    Snapshot(PosetSnapshot),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(h) => write!(f, "{h}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Unit => f.write_str("ok"),
            Self::Snapshot(s) => {
                let json = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// An `=>` expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectationFailure {
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

/// One executed line, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub line: usize,
    pub command: &'static str,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ExpectationFailure>,
}

/// Summary of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub executed: usize,
    pub failures: Vec<ExpectationFailure>,
    /// Set when `stop_on_failure` cut the run short.
    pub stopped_early: bool,
}

impl RunReport {
    /// Check if every expectation held.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn failed expectations into an error.
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::ExpectationsFailed {
                failed: self.failures.len(),
            })
        }
    }
}

/// Script interpreter owning a fresh registry.
#[derive(Debug)]
pub struct Interpreter {
    registry: Registry,
    last: Option<PosetHandle>,
    options: ScriptConfig,
}

impl Interpreter {
    /// Create an interpreter with an empty registry.
    #[must_use]
    pub fn new(options: ScriptConfig) -> Self {
        Self {
            registry: Registry::new(),
            last: None,
            options,
        }
    }

    /// The registry the script operates on.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run a single command and return its outcome.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        match command {
            Command::New => {
                let handle = self.registry.create();
                self.last = Some(handle);
                Outcome::Handle(handle)
            }
            Command::Delete(h) => {
                let handle = self.resolve(*h);
                self.registry.destroy(handle);
                Outcome::Unit
            }
            Command::Size(h) => Outcome::Count(self.registry.size(self.resolve(*h)) as u64),
            Command::Clear(h) => {
                let handle = self.resolve(*h);
                self.registry.clear(handle);
                Outcome::Unit
            }
            Command::Show(h) => Outcome::Snapshot(
                self.registry
                    .get(self.resolve(*h))
                    .map(Poset::snapshot)
                    .unwrap_or_default(),
            ),
            Command::Insert(h, name) => {
                let handle = self.resolve(*h);
                let ok = match name.as_deref() {
                    Some(name) => self.registry.insert(handle, name),
                    None => missing_name(command),
                };
                Outcome::Bool(ok)
            }
            Command::Remove(h, name) => {
                let handle = self.resolve(*h);
                let ok = match name.as_deref() {
                    Some(name) => self.registry.remove(handle, name),
                    None => missing_name(command),
                };
                Outcome::Bool(ok)
            }
            Command::Add(h, first, second) => {
                let handle = self.resolve(*h);
                let ok = match (first.as_deref(), second.as_deref()) {
                    (Some(a), Some(b)) => self.registry.add(handle, a, b),
                    _ => missing_name(command),
                };
                Outcome::Bool(ok)
            }
            Command::Del(h, first, second) => {
                let handle = self.resolve(*h);
                let ok = match (first.as_deref(), second.as_deref()) {
                    (Some(a), Some(b)) => self.registry.del(handle, a, b),
                    _ => missing_name(command),
                };
                Outcome::Bool(ok)
            }
            Command::Test(h, first, second) => {
                let handle = self.resolve(*h);
                let ok = match (first.as_deref(), second.as_deref()) {
                    (Some(a), Some(b)) => self.registry.test(handle, a, b),
                    _ => missing_name(command),
                };
                Outcome::Bool(ok)
            }
        }
    }

    /// Run one line: execute, audit if configured, check the expectation.
    pub fn run_line(&mut self, line: &Line) -> Result<Step, AppError> {
        let outcome = self.execute(&line.command);

        if self.options.check_invariants && line.command.is_mutating() {
            self.audit(line)?;
        }

        let failure = line
            .expect
            .filter(|expect| !expect.matches(&outcome))
            .map(|expect| expectation_failure(line.number, expect, &outcome));

        if let Some(failure) = &failure {
            tracing::warn!(
                line = failure.line,
                expected = %failure.expected,
                actual = %failure.actual,
                "expectation failed"
            );
        }

        Ok(Step {
            line: line.number,
            command: line.command.keyword(),
            outcome,
            failure,
        })
    }

    /// Run every line, handing each step to `on_step` as it completes.
    pub fn run<F>(&mut self, lines: &[Line], mut on_step: F) -> Result<RunReport, AppError>
    where
        F: FnMut(&Step) -> Result<(), AppError>,
    {
        let mut report = RunReport::default();

        for line in lines {
            let step = self.run_line(line)?;
            on_step(&step)?;
            report.executed += 1;

            if let Some(failure) = step.failure {
                report.failures.push(failure);
                if self.options.stop_on_failure {
                    report.stopped_early = true;
                    break;
                }
            }
        }

        tracing::info!(
            executed = report.executed,
            failed = report.failures.len(),
            "script finished"
        );
        Ok(report)
    }

    fn resolve(&self, handle: HandleRef) -> PosetHandle {
        match handle {
            HandleRef::Last => self.last.unwrap_or(NO_HANDLE),
            HandleRef::Id(id) => id,
        }
    }

    fn audit(&self, line: &Line) -> Result<(), AppError> {
        let Some(handle) = line.command.handle().map(|h| self.resolve(h)) else {
            return Ok(());
        };
        match self.registry.get(handle) {
            Some(poset) => poset
                .check_invariants()
                .map_err(|source| AppError::Invariant {
                    line: line.number,
                    source,
                }),
            None => Ok(()),
        }
    }
}

fn missing_name(command: &Command) -> bool {
    tracing::trace!(command = command.keyword(), "missing element name");
    false
}

fn expectation_failure(line: usize, expect: Expectation, outcome: &Outcome) -> ExpectationFailure {
    ExpectationFailure {
        line,
        expected: expect.to_string(),
        actual: outcome.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
