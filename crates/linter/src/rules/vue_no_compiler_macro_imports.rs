//! vue-no-compiler-macro-imports
//!
//! Compiler macros (`defineProps`, `withDefaults`, ...) are globals inside
//! `<script setup>` and must not be imported from `vue`. The fix removes the
//! specifier together with its separating comma inside the braces, or the
//! whole declaration when nothing else is imported.

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Program, Statement};
use oxc_span::{GetSpan, Span};

use common::constants::MACRO_IMPORT_NAMES;

use crate::diagnostic::{Diagnostic, Fix};
use crate::{RuleCategory, RuleMeta};

/// vue-no-compiler-macro-imports rule
#[derive(Debug, Clone, Default)]
pub struct VueNoCompilerMacroImports;

impl RuleMeta for VueNoCompilerMacroImports {
    const NAME: &'static str = "vue-no-compiler-macro-imports";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
}

fn is_macro_specifier(specifier: &ImportDeclarationSpecifier) -> bool {
    match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(named) => {
            MACRO_IMPORT_NAMES.contains(named.imported.name().as_str())
        }
        _ => false,
    }
}

impl VueNoCompilerMacroImports {
    pub fn new() -> Self {
        Self
    }

    /// Check the imports of a script setup program
    pub fn check(&self, program: &Program) -> Vec<Diagnostic> {
        program
            .body
            .iter()
            .filter_map(|statement| match statement {
                Statement::ImportDeclaration(import) if import.source.value.as_str() == "vue" => Some(import),
                _ => None,
            })
            .flat_map(|import| self.check_import(import))
            .collect()
    }

    fn check_import(&self, import: &ImportDeclaration) -> Vec<Diagnostic> {
        let Some(specifiers) = &import.specifiers else {
            return Vec::new();
        };
        let only_macros = specifiers.iter().all(is_macro_specifier);

        specifiers
            .iter()
            .enumerate()
            .filter(|(_, specifier)| is_macro_specifier(specifier))
            .map(|(index, specifier)| {
                let removal = if only_macros {
                    import.span
                } else if let Some(next) = specifiers.get(index + 1) {
                    Span::new(specifier.span().start, next.span().start)
                } else if let Some(
                    previous @ ImportDeclarationSpecifier::ImportSpecifier(_),
                ) = index.checked_sub(1).and_then(|i| specifiers.get(i))
                {
                    Span::new(previous.span().end, specifier.span().end)
                } else {
                    specifier.span()
                };

                Diagnostic::warning(
                    Self::NAME,
                    specifier.span(),
                    "Vue compiler macros do not need to be imported",
                )
                .with_fix(Fix::delete(removal).with_message("Remove the import"))
            })
            .collect()
    }
}
