//! Annotation extraction.
//!
//! A fixture is scanned once, top to bottom. Each line is tested against the
//! marker grammars independently:
//!
//! - `expect: <text>`
//! - `Error at <token>: <message>` (repeated on one line for several errors)
//! - `expect runtime error <kind>: <message>`
//!
//! Precedence is resolved afterwards over the scanned markers: any output
//! marker yields [`Expectation::Output`]; otherwise the first error marker
//! (the anchor) decides between a compile error and a runtime error. On a
//! single line the compile error grammar is tested before the runtime one.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{to_named_source, GenError};
use crate::expectation::{CompileErrorEntry, Expectation};

static OUTPUT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"expect: (.+)").unwrap());
static COMPILE_ERROR_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Error at (.*)").unwrap());
static RUNTIME_ERROR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"expect runtime error (.*)").unwrap());

/// Separates further errors reported on the anchor line.
const ERROR_SEPARATOR: &str = " Error at ";
/// Splits an error payload into token and message.
const PAYLOAD_SEPARATOR: &str = ": ";

/// An error payload whose token/message split failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedAnnotation {
    pub line: usize,
    pub payload: String,
    /// Byte offset of the payload within the fixture text.
    pub offset: usize,
}

impl MalformedAnnotation {
    /// Attaches the fixture source so the payload can be labelled.
    pub fn into_gen_error(self, path: &Path, text: &str) -> GenError {
        GenError::MalformedAnnotation {
            path: path.display().to_string(),
            line: self.line,
            src: to_named_source(path, text),
            span: (self.offset, self.payload.len()).into(),
            payload: self.payload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Payload<'a> {
    text: &'a str,
    offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ErrorMarker<'a> {
    Compile(Vec<Payload<'a>>),
    Runtime(Payload<'a>),
}

#[derive(Debug, Default)]
struct LineMarkers<'a> {
    output: Option<&'a str>,
    error: Option<ErrorMarker<'a>>,
}

#[derive(Debug, Default)]
struct Scan<'a> {
    outputs: Vec<&'a str>,
    anchor: Option<(usize, ErrorMarker<'a>)>,
}

/// Derives the expectation of a fixture from its text.
///
/// Returns [`Expectation::Invalid`] when no marker is present. Only the
/// payloads of the winning marker are decomposed, so a malformed error
/// annotation in a fixture that also carries output markers is ignored.
pub fn extract(text: &str) -> Result<Expectation, MalformedAnnotation> {
    resolve(scan(text))
}

fn scan(text: &str) -> Scan<'_> {
    let mut scan = Scan::default();
    let mut offset = 0;
    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let markers = scan_line(line, offset);
        if let Some(output) = markers.output {
            scan.outputs.push(output);
        }
        if scan.anchor.is_none() {
            scan.anchor = markers.error.map(|marker| (index + 1, marker));
        }
        offset += raw.len() + 1;
    }
    scan
}

fn scan_line(line: &str, offset: usize) -> LineMarkers<'_> {
    let output = OUTPUT_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let compile = COMPILE_ERROR_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1));

    let error = if let Some(payload) = compile {
        Some(ErrorMarker::Compile(split_compile_payloads(
            payload.as_str(),
            offset + payload.start(),
        )))
    } else {
        RUNTIME_ERROR_MARKER
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|payload| {
                ErrorMarker::Runtime(Payload {
                    text: payload.as_str(),
                    offset: offset + payload.start(),
                })
            })
    };

    LineMarkers { output, error }
}

fn split_compile_payloads(payload: &str, offset: usize) -> Vec<Payload<'_>> {
    let mut payloads = Vec::new();
    let mut start = 0;
    for (index, _) in payload.match_indices(ERROR_SEPARATOR) {
        payloads.push(Payload {
            text: &payload[start..index],
            offset: offset + start,
        });
        start = index + ERROR_SEPARATOR.len();
    }
    payloads.push(Payload {
        text: &payload[start..],
        offset: offset + start,
    });
    payloads
}

fn resolve(scan: Scan<'_>) -> Result<Expectation, MalformedAnnotation> {
    if !scan.outputs.is_empty() {
        return Ok(Expectation::Output {
            lines: scan.outputs.into_iter().map(str::to_string).collect(),
        });
    }

    let Some((line, marker)) = scan.anchor else {
        return Ok(Expectation::Invalid);
    };

    match marker {
        ErrorMarker::Compile(payloads) => {
            let entries = payloads
                .into_iter()
                .map(|payload| {
                    let (token, message) = decompose(payload, line)?;
                    Ok(CompileErrorEntry {
                        line,
                        token: token.to_string(),
                        message: message.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, MalformedAnnotation>>()?;
            Ok(Expectation::CompileError { entries })
        }
        ErrorMarker::Runtime(payload) => {
            let (kind, message) = decompose(payload, line)?;
            Ok(Expectation::RuntimeError {
                kind: kind.to_string(),
                message: message.to_string(),
                line,
            })
        }
    }
}

fn decompose(payload: Payload<'_>, line: usize) -> Result<(&str, &str), MalformedAnnotation> {
    payload
        .text
        .split_once(PAYLOAD_SEPARATOR)
        .ok_or_else(|| MalformedAnnotation {
            line,
            payload: payload.text.to_string(),
            offset: payload.offset,
        })
}
