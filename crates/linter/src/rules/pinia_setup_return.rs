//! pinia-setup-return
//!
//! A Pinia setup store must return its state, getters and actions. A setup
//! function without a top-level `return`, or returning `{}`, is reported.

use oxc_ast::ast::{CallExpression, Expression, Statement};
use oxc_span::GetSpan;

use common::check::{inner_expression, store_setup_body};

use crate::diagnostic::Diagnostic;
use crate::{RuleCategory, RuleMeta};

/// pinia-setup-return rule
#[derive(Debug, Clone, Default)]
pub struct PiniaSetupReturn;

impl RuleMeta for PiniaSetupReturn {
    const NAME: &'static str = "pinia-setup-return";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
}

impl PiniaSetupReturn {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, call: &CallExpression) -> Option<Diagnostic> {
        let body = store_setup_body(call)?;
        let returned = body.statements.iter().find_map(|statement| match statement {
            Statement::ReturnStatement(ret) => Some(ret),
            _ => None,
        });

        let returns_something = returned.is_some_and(|ret| match ret.argument.as_ref().map(inner_expression) {
            Some(Expression::ObjectExpression(object)) => !object.properties.is_empty(),
            _ => true,
        });
        if returns_something {
            return None;
        }

        let definer = call.arguments.get(1)?;
        Some(Diagnostic::warning(
            Self::NAME,
            definer.span(),
            "Pinia store setup definition must return something",
        ))
    }
}
