//! vue-no-function-expressions
//!
//! Top-level functions of `<script setup>` must be function declarations.

use oxc_ast::ast::{Program, Statement};

use common::check::is_function_expression;

use crate::diagnostic::Diagnostic;
use crate::{RuleCategory, RuleMeta};

/// vue-no-function-expressions rule
#[derive(Debug, Clone, Default)]
pub struct VueNoFunctionExpressions;

impl RuleMeta for VueNoFunctionExpressions {
    const NAME: &'static str = "vue-no-function-expressions";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl VueNoFunctionExpressions {
    pub fn new() -> Self {
        Self
    }

    /// Check the body of a script setup program
    pub fn check(&self, program: &Program) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for statement in &program.body {
            let Statement::VariableDeclaration(decl) = statement else {
                continue;
            };
            let function_declarators = decl
                .declarations
                .iter()
                .filter(|declarator| declarator.init.as_ref().is_some_and(is_function_expression));
            for _ in function_declarators {
                diagnostics.push(Diagnostic::warning(
                    Self::NAME,
                    decl.span,
                    "Function expression is forbidden when it's a direct child of script setup tag",
                ));
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{lines_of, run_rules};
    use crate::RulesConfig;

    const SOURCE: &str = "\
const a = () => {};
const b = (function () {});
function c() {
  const d = () => {};
}
const e = computed(() => 1);
";

    #[test]
    fn test_script_setup_function_expressions() {
        let config = RulesConfig::none().with_vue_no_function_expressions(true);
        let diagnostics = run_rules(SOURCE, config, true);
        assert_eq!(lines_of(SOURCE, &diagnostics), vec![1, 2]);
    }

    #[test]
    fn test_plain_modules_are_ignored() {
        let config = RulesConfig::none().with_vue_no_function_expressions(true);
        assert!(run_rules(SOURCE, config, false).is_empty());
    }
}
