//! # Script Language
//!
//! One command per line, mirroring the registry surface:
//!
//! ```text
//! new                      # create a poset, prints its handle
//! insert $ a               # `$` is the most recently created handle
//! add 1 a b => true        # optional expectation after `=>`
//! test $ a b
//! del $ a b
//! remove $ a
//! size $ => 0
//! clear $
//! show $                   # JSON snapshot
//! delete $
//! ```
//!
//! A missing element name is not a syntax error: the command runs and
//! reports `false`, exactly like a rejected request. A missing or malformed
//! handle, an unknown command word, or surplus arguments are syntax errors.

mod interpreter;

pub use interpreter::{ExpectationFailure, Interpreter, Outcome, RunReport, Step};

use crate::AppError;
use poset_core::PosetHandle;
use std::fmt;

// =============================================================================
// SYNTAX TREE
// =============================================================================

/// Reference to a poset handle in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRef {
    /// `$`: the handle returned by the latest `new`.
    Last,
    /// A literal handle number.
    Id(PosetHandle),
}

/// A parsed command. Element names are optional so that an absent name can
/// be rejected at run time instead of at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Delete(HandleRef),
    Size(HandleRef),
    Clear(HandleRef),
    Show(HandleRef),
    Insert(HandleRef, Option<String>),
    Remove(HandleRef, Option<String>),
    Add(HandleRef, Option<String>, Option<String>),
    Del(HandleRef, Option<String>, Option<String>),
    Test(HandleRef, Option<String>, Option<String>),
}

impl Command {
    /// The command word as written in scripts.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Delete(_) => "delete",
            Self::Size(_) => "size",
            Self::Clear(_) => "clear",
            Self::Show(_) => "show",
            Self::Insert(..) => "insert",
            Self::Remove(..) => "remove",
            Self::Add(..) => "add",
            Self::Del(..) => "del",
            Self::Test(..) => "test",
        }
    }

    /// The handle the command addresses, if any.
    #[must_use]
    pub fn handle(&self) -> Option<HandleRef> {
        match self {
            Self::New => None,
            Self::Delete(h) | Self::Size(h) | Self::Clear(h) | Self::Show(h) => Some(*h),
            Self::Insert(h, _) | Self::Remove(h, _) => Some(*h),
            Self::Add(h, ..) | Self::Del(h, ..) | Self::Test(h, ..) => Some(*h),
        }
    }

    /// Check if the command can change a poset's contents.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Clear(_) | Self::Insert(..) | Self::Remove(..) | Self::Add(..) | Self::Del(..)
        )
    }
}

/// Expected outcome written after `=>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Bool(bool),
    Count(u64),
    /// `ok`: any outcome is accepted.
    Ok,
}

impl Expectation {
    /// Check an outcome against this expectation.
    ///
    /// A count also matches a handle with the same number.
    #[must_use]
    pub fn matches(&self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (Self::Ok, _) => true,
            (Self::Bool(expected), Outcome::Bool(actual)) => expected == actual,
            (Self::Count(expected), Outcome::Count(actual)) => expected == actual,
            (Self::Count(expected), Outcome::Handle(handle)) => *expected == handle.value(),
            _ => false,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Ok => f.write_str("ok"),
        }
    }
}

/// One executable script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the source.
    pub number: usize,
    pub command: Command,
    pub expect: Option<Expectation>,
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse a whole script, failing on the first syntax error.
pub fn parse_script(source: &str) -> Result<Vec<Line>, AppError> {
    let mut lines = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(line) = parse_line(index + 1, text)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(number: usize, text: &str) -> Result<Option<Line>, AppError> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .take_while(|t| !t.starts_with('#'))
        .collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    let (body, expect) = match tokens.iter().position(|t| *t == "=>") {
        Some(i) => match &tokens[i + 1..] {
            [value] => (&tokens[..i], Some(parse_expectation(number, value)?)),
            _ => return Err(AppError::parse(number, "expected one value after `=>`")),
        },
        None => (&tokens[..], None),
    };

    let Some((word, args)) = body.split_first() else {
        return Err(AppError::parse(number, "missing command before `=>`"));
    };

    let command = parse_command(number, word, args)?;
    Ok(Some(Line {
        number,
        command,
        expect,
    }))
}

fn parse_command(number: usize, word: &str, args: &[&str]) -> Result<Command, AppError> {
    let arity = |max: usize| -> Result<(), AppError> {
        if args.len() > max {
            return Err(AppError::parse(
                number,
                format!("`{word}` takes at most {max} argument(s), got {}", args.len()),
            ));
        }
        Ok(())
    };
    let name = |i: usize| args.get(i).map(|s| (*s).to_owned());

    match word {
        "new" => {
            arity(0)?;
            return Ok(Command::New);
        }
        "delete" | "size" | "clear" | "show" => arity(1)?,
        "insert" | "remove" => arity(2)?,
        "add" | "del" | "test" => arity(3)?,
        other => return Err(AppError::parse(number, format!("unknown command `{other}`"))),
    }

    let handle = match args.first() {
        Some(token) => parse_handle(number, token)?,
        None => return Err(AppError::parse(number, format!("`{word}` needs a handle"))),
    };

    Ok(match word {
        "delete" => Command::Delete(handle),
        "size" => Command::Size(handle),
        "clear" => Command::Clear(handle),
        "show" => Command::Show(handle),
        "insert" => Command::Insert(handle, name(1)),
        "remove" => Command::Remove(handle, name(1)),
        "add" => Command::Add(handle, name(1), name(2)),
        "del" => Command::Del(handle, name(1), name(2)),
        _ => Command::Test(handle, name(1), name(2)),
    })
}

fn parse_handle(number: usize, token: &str) -> Result<HandleRef, AppError> {
    if token == "$" {
        return Ok(HandleRef::Last);
    }
    token
        .parse::<u64>()
        .map(|n| HandleRef::Id(PosetHandle(n)))
        .map_err(|_| AppError::parse(number, format!("invalid handle `{token}`")))
}

fn parse_expectation(number: usize, token: &str) -> Result<Expectation, AppError> {
    match token {
        "true" => Ok(Expectation::Bool(true)),
        "false" => Ok(Expectation::Bool(false)),
        "ok" => Ok(Expectation::Ok),
        _ => token
            .parse::<u64>()
            .map(Expectation::Count)
            .map_err(|_| AppError::parse(number, format!("invalid expectation `{token}`"))),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Line> {
        parse_line(1, text).expect("parse")
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("# setup"), None);
    }

    #[test]
    fn trailing_comment_ignored() {
        let line = parse("insert $ a # first element").expect("line");
        assert_eq!(
            line.command,
            Command::Insert(HandleRef::Last, Some("a".to_string()))
        );
    }

    #[test]
    fn expectation_parsed() {
        let line = parse("test 3 a b => false").expect("line");
        assert_eq!(
            line.command,
            Command::Test(
                HandleRef::Id(PosetHandle(3)),
                Some("a".to_string()),
                Some("b".to_string())
            )
        );
        assert_eq!(line.expect, Some(Expectation::Bool(false)));

        let line = parse("size $ => 4").expect("line");
        assert_eq!(line.expect, Some(Expectation::Count(4)));
    }

    #[test]
    fn missing_names_allowed() {
        let line = parse("add $ a").expect("line");
        assert_eq!(
            line.command,
            Command::Add(HandleRef::Last, Some("a".to_string()), None)
        );
    }

    #[test]
    fn syntax_errors_reported_with_line() {
        for text in [
            "frobnicate 1",
            "insert",
            "insert x a",
            "add $ a b c",
            "new 1",
            "test $ a b =>",
            "test $ a b => maybe",
            "=> true",
        ] {
            match parse_line(7, text) {
                Err(AppError::Parse { line, .. }) => assert_eq!(line, 7, "{text}"),
                other => unreachable!("{text}: expected parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn script_numbers_lines_from_one() {
        let lines = parse_script("new\n\n# c\ninsert $ a\n").expect("parse");
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn mutating_commands_classified() {
        assert!(Command::Clear(HandleRef::Last).is_mutating());
        assert!(!Command::Test(HandleRef::Last, None, None).is_mutating());
        assert!(!Command::New.is_mutating());
        assert_eq!(Command::New.handle(), None);
    }
}
