//! Per-directory generation.
//!
//! For a fixture group the generator enumerates fixture files, extracts each
//! expectation, renders it, and assembles the module. Per-fixture failures are
//! recorded in the [`GroupReport`] and the fixture is left out; I/O failures
//! abort the group.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assemble::ModuleAssembler;
use crate::config::GeneratorConfig;
use crate::diagnostics::GenError;
use crate::discovery::FixtureDiscoverer;
use crate::emit::TestEmitter;
use crate::extract::extract;
use crate::fixture::Fixture;

/// Whether the generated module is written or only compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// Written because it was missing or differed.
    Written,
    /// Already identical on disk; not rewritten.
    Unchanged,
    /// Check mode: on-disk module matches.
    UpToDate,
    /// Check mode: on-disk module is missing or differs.
    Stale,
}

/// A fixture left out of the generated module, with the reason.
#[derive(Debug, Serialize)]
pub struct SkippedFixture {
    pub path: PathBuf,
    pub reason: String,
    #[serde(skip)]
    pub error: GenError,
}

/// The module text for a group, before it touches the disk.
#[derive(Debug)]
pub struct GroupOutput {
    pub group: String,
    pub module_path: PathBuf,
    pub contents: String,
    pub tests: Vec<String>,
    pub skipped: Vec<SkippedFixture>,
}

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub module_path: PathBuf,
    pub status: ModuleStatus,
    pub tests: Vec<String>,
    pub skipped: Vec<SkippedFixture>,
    /// Previous on-disk contents of a stale module, for diffing.
    #[serde(skip)]
    pub previous: Option<String>,
    #[serde(skip)]
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    discoverer: FixtureDiscoverer,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let discoverer = FixtureDiscoverer::new(config.fixture_extension.clone());
        Self { config, discoverer }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Groups under `root` that contain fixtures, sorted by name.
    pub fn discover_groups(&self, root: &Path) -> Result<Vec<String>, GenError> {
        self.discoverer.discover_groups(root)
    }

    /// Builds the module text for `<root>/<group>` without writing it.
    pub fn render_group(&self, root: &Path, group: &str) -> Result<GroupOutput, GenError> {
        let dir = root.join(group);
        let emitter = TestEmitter::new(&self.config);
        let mut assembler = ModuleAssembler::new(&self.config);
        let mut tests = Vec::new();
        let mut skipped = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in self.discoverer.discover_fixture_files(&dir)? {
            let fixture = Fixture::load(group, &path)?;
            match self.render_fixture(&emitter, &fixture, &seen) {
                Ok(case) => {
                    let name = fixture.test_name();
                    seen.insert(name.clone(), path);
                    tests.push(name);
                    assembler.push(case);
                }
                Err(error) => skipped.push(SkippedFixture {
                    path,
                    reason: error.to_string(),
                    error,
                }),
            }
        }

        Ok(GroupOutput {
            group: group.to_string(),
            module_path: dir.join(&self.config.module_file),
            contents: assembler.finish(),
            tests,
            skipped,
        })
    }

    /// Generates `<root>/<group>/<module_file>` and reports what happened.
    pub fn generate_group(
        &self,
        root: &Path,
        group: &str,
        mode: WriteMode,
    ) -> Result<GroupReport, GenError> {
        let output = self.render_group(root, group)?;
        let existing = read_existing(&output.module_path)?;
        let matches = existing.as_deref() == Some(output.contents.as_str());

        let status = match (mode, matches) {
            (WriteMode::Write, true) => ModuleStatus::Unchanged,
            (WriteMode::Write, false) => {
                fs::write(&output.module_path, &output.contents)
                    .map_err(|e| GenError::io(&output.module_path, e))?;
                ModuleStatus::Written
            }
            (WriteMode::Check, true) => ModuleStatus::UpToDate,
            (WriteMode::Check, false) => ModuleStatus::Stale,
        };

        Ok(GroupReport {
            group: output.group,
            module_path: output.module_path,
            previous: if status == ModuleStatus::Stale { existing } else { None },
            status,
            tests: output.tests,
            skipped: output.skipped,
            contents: output.contents,
        })
    }

    /// Generates every group under `root`, stopping at the first fatal error.
    pub fn generate_all(&self, root: &Path, mode: WriteMode) -> Result<Vec<GroupReport>, GenError> {
        self.discover_groups(root)?
            .iter()
            .map(|group| self.generate_group(root, group, mode))
            .collect()
    }

    fn render_fixture(
        &self,
        emitter: &TestEmitter<'_>,
        fixture: &Fixture,
        seen: &HashMap<String, PathBuf>,
    ) -> Result<String, GenError> {
        let name = fixture.test_name();
        if let Some(first) = seen.get(&name) {
            return Err(GenError::DuplicateTestName {
                name,
                path: fixture.display_path(),
                first: first.display().to_string(),
            });
        }
        let expectation = extract(&fixture.text)
            .map_err(|malformed| malformed.into_gen_error(&fixture.path, &fixture.text))?;
        emitter.render_fixture(fixture, &expectation)
    }
}

fn read_existing(path: &Path) -> Result<Option<String>, GenError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GenError::io(path, e)),
    }
}
