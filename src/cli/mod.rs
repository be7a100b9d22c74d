//! The `lox-testgen` command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::{fs, process};

use clap::Parser;

use crate::cli::args::{Command, GenerateArgs, TestgenArgs};
use crate::config::GeneratorConfig;
use crate::diagnostics::GenError;
use crate::extract::extract;
use crate::generator::{Generator, GroupReport, ModuleStatus, WriteMode};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = TestgenArgs::parse();

    let result = match args.command {
        Command::Generate(generate) => handle_generate(generate),
        Command::Inspect { file, json } => handle_inspect(&file, json).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            output::print_error(e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when `--check` found a stale module.
fn handle_generate(args: GenerateArgs) -> Result<bool, GenError> {
    let config = load_config(&args)?;
    let generator = Generator::new(config);
    let mode = if args.check {
        WriteMode::Check
    } else {
        WriteMode::Write
    };

    let groups = if args.groups.is_empty() {
        generator.discover_groups(&args.root)?
    } else {
        args.groups.clone()
    };

    let mut reports: Vec<GroupReport> = Vec::with_capacity(groups.len());
    for group in &groups {
        let report = match generator.generate_group(&args.root, group, mode) {
            Ok(report) => report,
            Err(e) => {
                // Groups before the failing one are already written.
                if args.json {
                    output::print_json(&reports)?;
                }
                return Err(e);
            }
        };
        if !args.json {
            output::print_skipped(&report.skipped);
            output::print_report(&report);
            if report.status == ModuleStatus::Stale {
                output::print_module_diff(&report);
            }
        }
        reports.push(report);
    }

    if args.json {
        output::print_json(&reports)?;
    }

    Ok(!reports.iter().any(|r| r.status == ModuleStatus::Stale))
}

fn handle_inspect(file: &Path, json: bool) -> Result<(), GenError> {
    let text = fs::read_to_string(file).map_err(|e| GenError::io(file, e))?;
    let expectation = extract(&text).map_err(|malformed| malformed.into_gen_error(file, &text))?;
    if json {
        output::print_json(&expectation)?;
    } else {
        output::print_expectation(&expectation);
    }
    if !expectation.is_valid() {
        return Err(GenError::MalformedFixture {
            path: file.display().to_string(),
        });
    }
    Ok(())
}

fn load_config(args: &GenerateArgs) -> Result<GeneratorConfig, GenError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(extension) = &args.extension {
        config.fixture_extension = extension.clone();
    }
    if let Some(runner) = &args.runner {
        config.runner = runner.clone();
    }
    config.validate()?;
    Ok(config)
}
