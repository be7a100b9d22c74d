use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::GenError;

/// A single annotated interpreter fixture, read once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Name of the owning fixture directory.
    pub group: String,
    /// File name up to its first `.`.
    pub name: String,
    /// Path as rendered into the generated test.
    pub path: PathBuf,
    pub text: String,
}

impl Fixture {
    /// Reads the fixture at `path`, which must live inside the directory `group`.
    pub fn load(group: &str, path: &Path) -> Result<Self, GenError> {
        let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Ok(Self::from_source(group, path, text))
    }

    pub fn from_source(group: &str, path: &Path, text: impl Into<String>) -> Self {
        Self {
            group: group.to_string(),
            name: fixture_id(path),
            path: path.to_path_buf(),
            text: text.into(),
        }
    }

    /// The test function name, unique per directory as long as fixture names are.
    pub fn test_name(&self) -> String {
        test_name(&self.group, &self.name)
    }

    /// The fixture path with `/` separators, for embedding in generated code.
    pub fn display_path(&self) -> String {
        self.path.display().to_string().replace('\\', "/")
    }
}

/// Strips everything from the first `.` of the file name.
pub fn fixture_id(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_string()
}

/// Joins group and fixture id into a valid Rust identifier.
pub fn test_name(group: &str, fixture_id: &str) -> String {
    let name: String = format!("{group}_{fixture_id}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("t_{name}")
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_id_stops_at_first_dot() {
        assert_eq!(fixture_id(Path::new("src/tests/for_loop/basic.lox")), "basic");
        assert_eq!(fixture_id(Path::new("a.old.lox")), "a");
    }

    #[test]
    fn test_name_joins_group_and_id() {
        assert_eq!(test_name("for_loop", "closure_in_body"), "for_loop_closure_in_body");
    }

    #[test]
    fn test_name_sanitizes_identifiers() {
        assert_eq!(test_name("while-loop", "syntax error"), "while_loop_syntax_error");
        assert_eq!(test_name("2d", "grid"), "t_2d_grid");
    }

    #[test]
    fn display_path_uses_forward_slashes() {
        let fixture = Fixture::from_source("bool", Path::new("src\\tests\\bool\\equality.lox"), "");
        assert_eq!(fixture.display_path(), "src/tests/bool/equality.lox");
    }
}
