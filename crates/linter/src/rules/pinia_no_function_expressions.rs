//! pinia-no-function-expressions
//!
//! Actions of a setup store must be function declarations, not function
//! expressions assigned to a variable.

use oxc_ast::ast::{CallExpression, Statement};

use common::check::{is_function_expression, store_setup_body};

use crate::diagnostic::Diagnostic;
use crate::{RuleCategory, RuleMeta};

/// pinia-no-function-expressions rule
#[derive(Debug, Clone, Default)]
pub struct PiniaNoFunctionExpressions;

impl RuleMeta for PiniaNoFunctionExpressions {
    const NAME: &'static str = "pinia-no-function-expressions";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl PiniaNoFunctionExpressions {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, call: &CallExpression) -> Vec<Diagnostic> {
        let Some(body) = store_setup_body(call) else {
            return Vec::new();
        };

        body.statements
            .iter()
            .filter_map(|statement| match statement {
                Statement::VariableDeclaration(decl) => Some(decl),
                _ => None,
            })
            .filter(|decl| {
                decl.declarations
                    .first()
                    .and_then(|declarator| declarator.init.as_ref())
                    .is_some_and(is_function_expression)
            })
            .map(|decl| {
                Diagnostic::warning(
                    Self::NAME,
                    decl.span,
                    "Function expression is forbidden when it's a direct child of Pinia store setup definition",
                )
                .with_help("Use a function declaration instead")
            })
            .collect()
    }
}
