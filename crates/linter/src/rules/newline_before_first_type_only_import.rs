//! newline-before-first-type-only-import
//!
//! Type-only imports form their own block: exactly one blank line must
//! separate a value import from a following `import type`.

use oxc_ast::ast::{ImportDeclaration, Program, Statement};

use crate::diagnostic::Diagnostic;
use crate::spacing::{count_blank_lines_between, spacing_fix};
use crate::{LintContext, RuleCategory, RuleMeta};

/// newline-before-first-type-only-import rule
#[derive(Debug, Clone, Default)]
pub struct NewlineBeforeFirstTypeOnlyImport;

impl RuleMeta for NewlineBeforeFirstTypeOnlyImport {
    const NAME: &'static str = "newline-before-first-type-only-import";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl NewlineBeforeFirstTypeOnlyImport {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, ctx: &mut LintContext, program: &Program) {
        let mut previous: Option<&ImportDeclaration> = None;
        for statement in &program.body {
            let Statement::ImportDeclaration(import) = statement else {
                continue;
            };
            if let Some(previous) = previous {
                if !previous.import_kind.is_type() && import.import_kind.is_type() {
                    self.check_pair(ctx, previous, import);
                }
            }
            previous = Some(&**import);
        }
    }

    fn check_pair(&self, ctx: &mut LintContext, previous: &ImportDeclaration, import: &ImportDeclaration) {
        if count_blank_lines_between(ctx, previous.span, import.span, false) == 1 {
            return;
        }
        let fix = spacing_fix(ctx, previous.span, import.span, 1);
        ctx.report(
            Diagnostic::warning(
                Self::NAME,
                import.span,
                "There must be exactly one newline before the first typed import",
            )
            .with_optional_fix(fix),
        );
    }
}
