//! Error taxonomy for the test generator.
//!
//! Every failure is a [`GenError`]. Per-fixture errors (a fixture without any
//! annotation, an annotation whose payload cannot be decomposed, a clashing
//! test name) are recorded and the fixture is skipped. Everything else is
//! fatal for the directory being processed.

use std::path::Path;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Shared, named fixture source used for labelled diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

/// Converts a fixture path and its text into a named source for diagnostics.
pub fn to_named_source(path: &Path, text: &str) -> SourceArc {
    Arc::new(NamedSource::new(path.display().to_string(), text.to_string()))
}

#[derive(Error, Diagnostic, Debug)]
pub enum GenError {
    #[error("Invalid test format: no annotation found in '{path}'")]
    #[diagnostic(
        code(lox_testgen::fixture::malformed),
        help("annotate the fixture with `expect: <output>`, `Error at <token>: <message>` or `expect runtime error <kind>: <message>`")
    )]
    MalformedFixture { path: String },

    #[error("Malformed annotation in '{path}' on line {line}: '{payload}'")]
    #[diagnostic(
        code(lox_testgen::annotation::malformed),
        help("error annotations must read `<token>: <message>`")
    )]
    MalformedAnnotation {
        path: String,
        line: usize,
        payload: String,
        #[source_code]
        src: SourceArc,
        #[label("missing `: ` separator")]
        span: SourceSpan,
    },

    #[error("Duplicate test name '{name}': '{path}' clashes with '{first}'")]
    #[diagnostic(
        code(lox_testgen::fixture::duplicate),
        help("fixture names must be unique within a directory once the extension is stripped")
    )]
    DuplicateTestName {
        name: String,
        path: String,
        first: String,
    },

    #[error("I/O failure on '{path}'")]
    #[diagnostic(code(lox_testgen::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory '{path}'")]
    #[diagnostic(code(lox_testgen::io::walk))]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(lox_testgen::config))]
    Config {
        message: String,
        #[source]
        source: Option<serde_yaml::Error>,
    },
}

impl GenError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn walk(path: &Path, source: walkdir::Error) -> Self {
        GenError::Walk {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GenError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Fatal errors abort the directory being generated; the others only
    /// skip a single fixture.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GenError::Io { .. } | GenError::Walk { .. } | GenError::Config { .. }
        )
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    #[test]
    fn malformed_annotation_report_underlines_payload() {
        let text = "print x;\n// expect runtime error oops\n";
        let src = to_named_source(Path::new("group/bad.lox"), text);
        let err = GenError::MalformedAnnotation {
            path: "group/bad.lox".to_string(),
            line: 2,
            payload: "oops".to_string(),
            src,
            span: (33, 4).into(),
        };
        assert!(!err.is_fatal());
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("group/bad.lox"));
        assert!(output.contains("missing `: ` separator"));
    }

    #[test]
    fn io_errors_are_fatal() {
        let err = GenError::io(
            Path::new("missing"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "I/O failure on 'missing'");
    }

    #[test]
    fn malformed_fixture_names_the_file() {
        let err = GenError::MalformedFixture {
            path: "src/tests/bool/empty.lox".to_string(),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("src/tests/bool/empty.lox"));
    }
}
