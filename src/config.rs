//! Generator configuration.
//!
//! Defaults reproduce the layout of a Lox interpreter crate whose fixtures
//! live under `src/tests/<group>/*.lox` and whose test support module exposes
//! `run_from_file`. A YAML file may override any field:
//!
//! ```yaml
//! fixture_extension: lox
//! module_file: mod.rs
//! runner: crate::tests::run_from_file
//! indent: "    "
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::GenError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Files with this extension (without the dot) are fixtures.
    pub fixture_extension: String,
    /// Name of the generated module inside each fixture directory.
    pub module_file: String,
    /// Import path of the function that runs a fixture and returns its output lines.
    pub runner: String,
    /// Indentation unit of the generated module.
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fixture_extension: "lox".to_string(),
            module_file: "mod.rs".to_string(),
            runner: "crate::tests::run_from_file".to_string(),
            indent: "\t".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, GenError> {
        let config: Self = serde_yaml::from_str(source).map_err(|e| GenError::Config {
            message: format!("failed to parse YAML: {}", e),
            source: Some(e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GenError> {
        let source = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_yaml_str(&source)
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if self.fixture_extension.is_empty() || self.fixture_extension.starts_with('.') {
            return Err(GenError::config(format!(
                "fixture_extension must be a non-empty extension without a leading dot, got '{}'",
                self.fixture_extension
            )));
        }
        if self.module_file.is_empty() {
            return Err(GenError::config("module_file must not be empty"));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(GenError::config(format!(
                "indent must consist of spaces or tabs, got '{}'",
                self.indent
            )));
        }
        if self.runner_name().is_empty() {
            return Err(GenError::config(format!(
                "runner must name a function, got '{}'",
                self.runner
            )));
        }
        Ok(())
    }

    /// The runner's function name: the last segment of its import path.
    pub fn runner_name(&self) -> &str {
        self.runner.rsplit("::").next().unwrap_or_default().trim()
    }
}
