//! Renders one expectation as a `#[test]` function.

use crate::config::GeneratorConfig;
use crate::diagnostics::GenError;
use crate::expectation::Expectation;
use crate::fixture::{test_name, Fixture};

/// Renders `s` as a Rust string literal.
///
/// Quotes, backslashes and control characters are escaped, so no payload can
/// terminate the literal early.
pub fn string_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Renders a slice of strings as a Rust array literal.
pub fn array_literal<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<String> = items.iter().map(|s| string_literal(s.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

#[derive(Debug, Clone, Copy)]
pub struct TestEmitter<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> TestEmitter<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    /// Renders the test case for a fixture's expectation.
    ///
    /// `Invalid` expectations are rejected with [`GenError::MalformedFixture`]
    /// and produce no text.
    pub fn render(
        &self,
        fixture_id: &str,
        group: &str,
        path: &str,
        expectation: &Expectation,
    ) -> Result<String, GenError> {
        let expected = expectation
            .expected_lines()
            .ok_or_else(|| GenError::MalformedFixture {
                path: path.to_string(),
            })?;

        let indent = &self.config.indent;
        let mut out = String::new();
        out.push_str(&format!("{indent}#[test]\n"));
        out.push_str(&format!("{indent}fn {}() {{\n", test_name(group, fixture_id)));
        out.push_str(&format!(
            "{indent}{indent}assert_eq!({}({}), {});\n",
            self.config.runner_name(),
            string_literal(path),
            array_literal(&expected)
        ));
        out.push_str(&format!("{indent}}}\n\n"));
        Ok(out)
    }

    pub fn render_fixture(
        &self,
        fixture: &Fixture,
        expectation: &Expectation,
    ) -> Result<String, GenError> {
        self.render(&fixture.name, &fixture.group, &fixture.display_path(), expectation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::CompileErrorEntry;

    #[test]
    fn string_literal_escapes_quotes_and_backslashes() {
        assert_eq!(string_literal(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(string_literal(r"a\b"), r#""a\\b""#);
        assert_eq!(string_literal("it's"), r#""it's""#);
        assert_eq!(string_literal("tab\there"), r#""tab\there""#);
    }

    #[test]
    fn renders_output_case() {
        let config = GeneratorConfig::default();
        let emitter = TestEmitter::new(&config);
        let text = emitter
            .render(
                "basic",
                "for_loop",
                "src/tests/for_loop/basic.lox",
                &Expectation::Output {
                    lines: vec!["1".to_string(), "2".to_string()],
                },
            )
            .unwrap();
        assert_eq!(
            text,
            "\t#[test]\n\tfn for_loop_basic() {\n\t\tassert_eq!(run_from_file(\"src/tests/for_loop/basic.lox\"), [\"1\", \"2\"]);\n\t}\n\n"
        );
    }

    #[test]
    fn renders_single_compile_error() {
        let config = GeneratorConfig::default();
        let text = TestEmitter::new(&config)
            .render(
                "undefined",
                "variable",
                "src/tests/variable/undefined.lox",
                &Expectation::CompileError {
                    entries: vec![CompileErrorEntry {
                        line: 3,
                        token: "x".to_string(),
                        message: "Undefined variable.".to_string(),
                    }],
                },
            )
            .unwrap();
        assert!(text.contains(
            r#"["[Line 3] Error at x", "Error Message: Undefined variable."]"#
        ));
    }

    #[test]
    fn invalid_expectation_is_an_error() {
        let config = GeneratorConfig::default();
        let err = TestEmitter::new(&config)
            .render("empty", "bool", "src/tests/bool/empty.lox", &Expectation::Invalid)
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::MalformedFixture { ref path } if path == "src/tests/bool/empty.lox"
        ));
    }

    #[test]
    fn honours_configured_indent_and_runner() {
        let config = GeneratorConfig {
            runner: "support::interpret".to_string(),
            indent: "    ".to_string(),
            ..GeneratorConfig::default()
        };
        let text = TestEmitter::new(&config)
            .render(
                "print",
                "bool",
                "t/bool/print.lox",
                &Expectation::RuntimeError {
                    kind: "Type".to_string(),
                    message: "Operands must be numbers.".to_string(),
                    line: 2,
                },
            )
            .unwrap();
        assert!(text.starts_with(
            "    #[test]\n    fn bool_print() {\n        assert_eq!(interpret(\"t/bool/print.lox\")"
        ));
        assert!(text.contains(
            r#"["[Line 2] Runtime Type Error", "Error Message: Operands must be numbers."]"#
        ));
    }
}
