//! pinia-style
//!
//! Enforce one way of defining Pinia stores: a setup function (default) or
//! an options object.

use oxc_ast::ast::{CallExpression, Expression};
use oxc_span::GetSpan;
use serde::{Deserialize, Serialize};

use common::check::{argument_expression, inner_expression};

use crate::diagnostic::Diagnostic;
use crate::{RuleCategory, RuleMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStyle {
    /// `defineStore('id', () => { ... })`
    #[default]
    Setup,
    /// `defineStore('id', { state, getters, actions })`
    Options,
}

/// pinia-style rule
#[derive(Debug, Clone, Default)]
pub struct PiniaStyle {
    pub style: StoreStyle,
}

impl RuleMeta for PiniaStyle {
    const NAME: &'static str = "pinia-style";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl PiniaStyle {
    pub fn new(style: StoreStyle) -> Self {
        Self { style }
    }

    /// Check the definer argument of a `defineStore` call
    pub fn check(&self, call: &CallExpression) -> Vec<Diagnostic> {
        let Some(definer) = call.arguments.get(1) else {
            return Vec::new();
        };
        let is_object = matches!(
            argument_expression(call, 1).map(inner_expression),
            Some(Expression::ObjectExpression(_))
        );

        let message = match (self.style, is_object) {
            (StoreStyle::Setup, true) => "Stores must be defined in the Composition API style",
            (StoreStyle::Options, false) => "Stores must be defined in the Options API style",
            _ => return Vec::new(),
        };
        vec![Diagnostic::warning(Self::NAME, definer.span(), message)]
    }
}
