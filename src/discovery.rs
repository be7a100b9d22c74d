use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::GenError;

/// Enumerates fixture groups and the fixture files inside them.
#[derive(Debug, Clone)]
pub struct FixtureDiscoverer {
    extension: String,
}

impl FixtureDiscoverer {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    // =====================
    // Public API
    // =====================

    /// Lists the fixture files directly inside `dir`.
    ///
    /// Subdirectories are not descended into; they are groups of their own.
    /// The list is sorted so generated modules are stable across runs.
    pub fn discover_fixture_files(&self, dir: &Path) -> Result<Vec<PathBuf>, GenError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| GenError::walk(dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !self.is_fixture(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
        files.sort();
        Ok(files)
    }

    /// Lists the names of the subdirectories of `root` holding at least one fixture.
    pub fn discover_groups(&self, root: &Path) -> Result<Vec<String>, GenError> {
        let mut groups = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| GenError::walk(root, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if self.discover_fixture_files(entry.path())?.is_empty() {
                continue;
            }
            groups.push(entry.file_name().to_string_lossy().into_owned());
        }
        groups.sort();
        Ok(groups)
    }

    // =====================
    // Internal
    // =====================

    fn is_fixture(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }
}
