//! Shared helpers for building fixture trees in temporary directories.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary `<root>/<group>/<fixture>` tree.
pub struct FixtureTree {
    dir: TempDir,
}

impl FixtureTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a fixture, creating its group directory as needed.
    pub fn add(&self, group: &str, file: &str, text: &str) -> PathBuf {
        let dir = self.root().join(group);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, text).unwrap();
        path
    }

    pub fn module_path(&self, group: &str) -> PathBuf {
        self.root().join(group).join("mod.rs")
    }

    pub fn read_module(&self, group: &str) -> String {
        fs::read_to_string(self.module_path(group)).unwrap()
    }

    /// The path a generated test embeds for a fixture.
    pub fn fixture_path(&self, group: &str, file: &str) -> String {
        self.root()
            .join(group)
            .join(file)
            .display()
            .to_string()
            .replace('\\', "/")
    }
}

/// Pulls the `[...]` literal out of the assertion for `test_name`.
pub fn expected_literal<'a>(module: &'a str, test_name: &str) -> &'a str {
    let start = module
        .find(&format!("fn {test_name}()"))
        .unwrap_or_else(|| panic!("no test named {test_name} in:\n{module}"));
    let body = &module[start..];
    let open = body.find("), [").unwrap() + 3;
    let close = body.find("]);").unwrap() + 1;
    &body[open..close]
}
