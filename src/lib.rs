//! Generates Rust test modules from annotated Lox interpreter fixtures.
//!
//! A fixture is a `.lox` program whose comments state what running it must
//! produce: printed output (`expect: ...`), compile errors
//! (`Error at <token>: <message>`) or a runtime error
//! (`expect runtime error <kind>: <message>`). For each fixture directory the
//! generator writes a `mod.rs` with one `#[test]` per fixture.

pub use crate::diagnostics::GenError;
pub use crate::expectation::{CompileErrorEntry, Expectation};
pub use crate::extract::{extract, MalformedAnnotation};
pub use crate::generator::{Generator, GroupReport, ModuleStatus, WriteMode};

pub mod assemble;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod emit;
pub mod expectation;
pub mod extract;
pub mod fixture;
pub mod generator;
