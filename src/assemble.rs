//! Assembles rendered test cases into one generated module.

use crate::config::GeneratorConfig;

/// Collects rendered cases in order and wraps them in the module boilerplate.
#[derive(Debug)]
pub struct ModuleAssembler<'c> {
    config: &'c GeneratorConfig,
    cases: Vec<String>,
}

impl<'c> ModuleAssembler<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            cases: Vec::new(),
        }
    }

    pub fn push(&mut self, case: String) {
        self.cases.push(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn header(&self) -> String {
        format!(
            "#[cfg(test)]\nmod tests {{\n{}use {};\n\n",
            self.config.indent, self.config.runner
        )
    }

    pub fn footer(&self) -> &'static str {
        "}\n"
    }

    pub fn finish(self) -> String {
        let mut module = self.header();
        for case in &self.cases {
            module.push_str(case);
        }
        module.push_str(self.footer());
        module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_is_just_boilerplate() {
        let config = GeneratorConfig::default();
        let assembler = ModuleAssembler::new(&config);
        assert!(assembler.is_empty());
        assert_eq!(
            assembler.finish(),
            "#[cfg(test)]\nmod tests {\n\tuse crate::tests::run_from_file;\n\n}\n"
        );
    }

    #[test]
    fn cases_keep_insertion_order() {
        let config = GeneratorConfig::default();
        let mut assembler = ModuleAssembler::new(&config);
        assembler.push("\t// first\n".to_string());
        assembler.push("\t// second\n".to_string());
        assert_eq!(assembler.len(), 2);
        let module = assembler.finish();
        let first = module.find("first").unwrap();
        let second = module.find("second").unwrap();
        assert!(first < second);
        assert!(module.ends_with("\t// second\n}\n"));
    }
}
