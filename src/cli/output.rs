//! Handles all user-facing output for the CLI.
//!
//! Status lines go to stdout, coloured when the terminal allows it. Fixture
//! diagnostics are rendered to stderr through miette.

use std::io::Write;
use std::path::Path;

use difference::{Changeset, Difference};
use miette::{GraphicalReportHandler, Report};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::GenError;
use crate::expectation::Expectation;
use crate::generator::{GroupReport, ModuleStatus, SkippedFixture};

/// Fixture paths are long; keep diagnostic headers on one line.
const DIAGNOSTIC_WIDTH: usize = 200;

/// Prints the one-line summary of a group.
pub fn print_report(report: &GroupReport) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let (label, color) = match report.status {
        ModuleStatus::Written => ("Generated", Color::Green),
        ModuleStatus::Unchanged => ("Unchanged", Color::Cyan),
        ModuleStatus::UpToDate => ("Up to date", Color::Cyan),
        ModuleStatus::Stale => ("Stale", Color::Red),
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{:>12}", label);
    let _ = stdout.reset();
    let _ = write!(
        stdout,
        " {} ({} tests) -> {}",
        report.group,
        report.tests.len(),
        report.module_path.display()
    );
    if !report.skipped.is_empty() {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = write!(stdout, ", {} skipped", report.skipped.len());
        let _ = stdout.reset();
    }
    let _ = writeln!(stdout);
}

/// Renders each skipped fixture's diagnostic once.
pub fn print_skipped(skipped: &[SkippedFixture]) {
    for fixture in skipped {
        print_diagnostic(&fixture.error);
    }
}

pub fn print_diagnostic(error: &GenError) {
    eprintln!("{}", render(error));
}

/// Prints a fatal error with its cause chain.
pub fn print_error(error: GenError) {
    eprintln!("{:?}", Report::new(error));
}

/// Shows how a stale module differs from what would be generated.
pub fn print_module_diff(report: &GroupReport) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let previous = report.previous.as_deref().unwrap_or_default();
    let changeset = Changeset::new(previous, &report.contents, "\n");
    print_diff(&mut stdout, &changeset.diffs);
}

pub fn print_expectation(expectation: &Expectation) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "Expectation: {:#?}", expectation);
    let _ = stdout.reset();
    if let Some(lines) = expectation.expected_lines() {
        for line in lines {
            let _ = writeln!(stdout, "  {}", line);
        }
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), GenError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| GenError::io(Path::new("<stdout>"), e.into()))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn render(error: &GenError) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new().with_width(DIAGNOSTIC_WIDTH);
    if handler.render_report(&mut out, error).is_err() {
        return error.to_string();
    }
    out
}

fn print_diff(stdout: &mut StandardStream, diffs: &[Difference]) {
    for diff in diffs {
        match diff {
            Difference::Same(ref x) => {
                let _ = stdout.reset();
                for line in x.lines() {
                    let _ = writeln!(stdout, " {}", line);
                }
            }
            Difference::Add(ref x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                for line in x.lines() {
                    let _ = writeln!(stdout, "+{}", line);
                }
            }
            Difference::Rem(ref x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                for line in x.lines() {
                    let _ = writeln!(stdout, "-{}", line);
                }
            }
        }
    }
    let _ = stdout.reset();
}
