//! The structured form of a fixture's annotations.

use serde::Serialize;

/// One diagnostic expected at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileErrorEntry {
    /// 1-based anchor line shared by every entry of a fixture.
    pub line: usize,
    pub token: String,
    pub message: String,
}

/// What running a fixture through the interpreter is expected to produce.
///
/// Exactly one variant is derived per fixture. `Output` wins over
/// `CompileError`, which wins over `RuntimeError`; `Invalid` means no marker
/// was recognized at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "expect", rename_all = "snake_case")]
pub enum Expectation {
    /// Every `expect: ` payload, in file order. Never empty.
    Output { lines: Vec<String> },
    /// One entry per `Error at ` marker on the anchor line, left to right.
    CompileError { entries: Vec<CompileErrorEntry> },
    /// A single `expect runtime error <kind>: <message>` marker.
    RuntimeError {
        kind: String,
        message: String,
        line: usize,
    },
    Invalid,
}

impl Expectation {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Expectation::Invalid)
    }

    /// The exact lines the interpreter run must return, or `None` for
    /// `Invalid`.
    pub fn expected_lines(&self) -> Option<Vec<String>> {
        match self {
            Expectation::Output { lines } => Some(lines.clone()),
            Expectation::CompileError { entries } => Some(
                entries
                    .iter()
                    .flat_map(|entry| {
                        [
                            format!("[Line {}] Error at {}", entry.line, entry.token),
                            format!("Error Message: {}", entry.message),
                        ]
                    })
                    .collect(),
            ),
            Expectation::RuntimeError {
                kind,
                message,
                line,
            } => Some(vec![
                format!("[Line {}] Runtime {} Error", line, kind),
                format!("Error Message: {}", message),
            ]),
            Expectation::Invalid => None,
        }
    }
}
