//! Vue script setup and Pinia setup store lint rules
//!
//! The engine discovers component (`<script setup>`) and store definitions in
//! a single traversal, buckets their root statements into semantic groups
//! (props, states, computed properties, watchers, hooks, methods, ...) and
//! validates the order of those groups and the blank lines around them.
//! Rules can be used:
//! 1. Through [`lint_with_config`] on a parsed oxc program
//! 2. One at a time, over the definitions found by the runner

pub mod discovery;
pub mod groups;
pub mod order;
pub mod rules;
pub mod settings;
pub mod spacing;
pub mod trace;
pub mod visitor;
mod context;
mod diagnostic;
#[cfg(test)]
mod test_utils;

pub use context::LintContext;
pub use diagnostic::{Diagnostic, DiagnosticSeverity, Fix, Label};
pub use groups::{DefinitionInstance, DefinitionKind, GroupMember, GroupName, GroupOrder, Vocabulary};
pub use rules::*;
pub use settings::ResolvedSettings;
pub use visitor::{lint, lint_with_config, LintResult, LintRunner, RulesConfig, VisitorLintContext};

/// Rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that detect code that is likely to be incorrect
    Correctness,
    /// Rules that enforce layout and ordering conventions
    Style,
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    /// URL to documentation
    fn docs_url() -> String {
        format!(
            "https://github.com/programic/eslint-plugin/blob/master/docs/src/rules/{}.md",
            Self::NAME
        )
    }
}
