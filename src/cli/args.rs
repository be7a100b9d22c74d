//! Defines the command-line arguments and subcommands for `lox-testgen`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "lox-testgen",
    version,
    about = "Generates Rust test modules from annotated Lox fixtures."
)]
pub struct TestgenArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate `mod.rs` for fixture directories under ROOT.
    Generate(GenerateArgs),
    /// Print the expectation extracted from a single fixture.
    Inspect {
        /// The fixture file to inspect.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the expectation as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory whose subdirectories hold fixtures.
    #[arg(default_value = "src/tests")]
    pub root: PathBuf,
    /// Only generate these groups; all groups with fixtures by default.
    #[arg(short, long = "group")]
    pub groups: Vec<String>,
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Fixture file extension, overriding the configuration.
    #[arg(long)]
    pub extension: Option<String>,
    /// Runner import path, overriding the configuration.
    #[arg(long)]
    pub runner: Option<String>,
    /// Do not write; fail if any generated module is out of date.
    #[arg(long)]
    pub check: bool,
    /// Print the reports as JSON.
    #[arg(long)]
    pub json: bool,
}
