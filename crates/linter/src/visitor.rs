//! Single-pass lint runner
//!
//! `LintRunner` walks the tree once. During the walk it only discovers
//! definitions (script setup programs and Pinia setup stores) and collects
//! their group members; every rule runs afterwards over the finalized groups,
//! so the rules never see a partially built definition.

use oxc_ast::ast::Program;
use oxc_ast::AstKind;
use oxc_ast_visit::Visit;
use oxc_semantic::{Scoping, SemanticBuilder};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::discovery::DefinitionCollector;
use crate::rules::{
    NewlineBeforeFirstTypeOnlyImport, NewlinesBetweenGroupsConfig, NewlinesInsideGroupsConfig,
    PiniaNoFunctionExpressions, PiniaSetupNewlinesBetweenGroups, PiniaSetupNewlinesInsideGroups,
    PiniaSetupOrder, PiniaSetupReturn, PiniaStyle, SetupOrderConfig, StoreStyle,
    VueNoCompilerMacroImports, VueNoFunctionExpressions, VueScriptSetupNewlinesBetweenGroups,
    VueScriptSetupNewlinesInsideGroups, VueScriptSetupOrder,
};
use crate::settings::{parse_rule_options, ResolvedSettings};
use crate::trace::{ReferenceResolver, TraceMap};
use crate::RuleMeta;

/// Configuration for which rules are enabled
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub settings: ResolvedSettings,
    pub vue_script_setup_order: Option<VueScriptSetupOrder>,
    pub pinia_setup_order: Option<PiniaSetupOrder>,
    pub vue_script_setup_newlines_between_groups: Option<VueScriptSetupNewlinesBetweenGroups>,
    pub pinia_setup_newlines_between_groups: Option<PiniaSetupNewlinesBetweenGroups>,
    pub vue_script_setup_newlines_inside_groups: Option<VueScriptSetupNewlinesInsideGroups>,
    pub pinia_setup_newlines_inside_groups: Option<PiniaSetupNewlinesInsideGroups>,
    pub pinia_style: Option<PiniaStyle>,
    pub pinia_setup_return: bool,
    pub pinia_no_function_expressions: bool,
    pub vue_no_function_expressions: bool,
    pub vue_no_compiler_macro_imports: bool,
    pub newline_before_first_type_only_import: bool,
    /// Per-rule severity overrides; rules not listed report warnings
    pub severities: FxHashMap<&'static str, DiagnosticSeverity>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::all(ResolvedSettings::default())
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every rule enabled with its default options over `settings`
    pub fn all(settings: ResolvedSettings) -> Self {
        Self {
            vue_script_setup_order: Some(VueScriptSetupOrder::with_config(
                &SetupOrderConfig::default(),
                &settings,
            )),
            pinia_setup_order: Some(PiniaSetupOrder::with_config(&SetupOrderConfig::default(), &settings)),
            vue_script_setup_newlines_between_groups: Some(VueScriptSetupNewlinesBetweenGroups::new()),
            pinia_setup_newlines_between_groups: Some(PiniaSetupNewlinesBetweenGroups::new()),
            vue_script_setup_newlines_inside_groups: Some(VueScriptSetupNewlinesInsideGroups::new()),
            pinia_setup_newlines_inside_groups: Some(PiniaSetupNewlinesInsideGroups::new()),
            pinia_style: Some(PiniaStyle::default()),
            pinia_setup_return: true,
            pinia_no_function_expressions: true,
            vue_no_function_expressions: true,
            vue_no_compiler_macro_imports: true,
            newline_before_first_type_only_import: true,
            severities: FxHashMap::default(),
            settings,
        }
    }

    pub fn none() -> Self {
        Self {
            settings: ResolvedSettings::default(),
            vue_script_setup_order: None,
            pinia_setup_order: None,
            vue_script_setup_newlines_between_groups: None,
            pinia_setup_newlines_between_groups: None,
            vue_script_setup_newlines_inside_groups: None,
            pinia_setup_newlines_inside_groups: None,
            pinia_style: None,
            pinia_setup_return: false,
            pinia_no_function_expressions: false,
            vue_no_function_expressions: false,
            vue_no_compiler_macro_imports: false,
            newline_before_first_type_only_import: false,
            severities: FxHashMap::default(),
        }
    }

    /// Build from a config file object (`{ "settings": ..., "rules": ... }`).
    ///
    /// Rules not mentioned keep their default (enabled, warning). A rule entry
    /// that cannot be understood is ignored with a warning.
    pub fn from_value(value: &Value) -> Self {
        let settings = ResolvedSettings::from_value(value.get("settings"));
        let mut config = Self::all(settings);

        let Some(rules) = value.get("rules") else {
            return config;
        };
        let Some(rules) = rules.as_object() else {
            tracing::warn!("`rules` is not an object, using the default rules");
            return config;
        };

        for (name, entry) in rules {
            let Some((level, options)) = parse_rule_entry(entry) else {
                tracing::warn!(rule = %name, "invalid rule entry, keeping the default");
                continue;
            };
            if !config.configure(name, level, options) {
                tracing::warn!(rule = %name, "unknown rule");
            }
        }
        config
    }

    /// Apply one rule entry. Returns false for an unknown rule name.
    fn configure(&mut self, name: &str, level: RuleLevel, options: Option<&Value>) -> bool {
        let settings = &self.settings;
        let rule: &'static str = match name {
            name if name == VueScriptSetupOrder::NAME => {
                let options: SetupOrderConfig = parse_rule_options(name, options);
                self.vue_script_setup_order = level
                    .enabled()
                    .then(|| VueScriptSetupOrder::with_config(&options, settings));
                VueScriptSetupOrder::NAME
            }
            name if name == PiniaSetupOrder::NAME => {
                let options: SetupOrderConfig = parse_rule_options(name, options);
                self.pinia_setup_order = level
                    .enabled()
                    .then(|| PiniaSetupOrder::with_config(&options, settings));
                PiniaSetupOrder::NAME
            }
            name if name == VueScriptSetupNewlinesBetweenGroups::NAME => {
                let options: NewlinesBetweenGroupsConfig = parse_rule_options(name, options);
                self.vue_script_setup_newlines_between_groups = level
                    .enabled()
                    .then(|| VueScriptSetupNewlinesBetweenGroups::with_config(options));
                VueScriptSetupNewlinesBetweenGroups::NAME
            }
            name if name == PiniaSetupNewlinesBetweenGroups::NAME => {
                let options: NewlinesBetweenGroupsConfig = parse_rule_options(name, options);
                self.pinia_setup_newlines_between_groups = level
                    .enabled()
                    .then(|| PiniaSetupNewlinesBetweenGroups::with_config(options));
                PiniaSetupNewlinesBetweenGroups::NAME
            }
            name if name == VueScriptSetupNewlinesInsideGroups::NAME => {
                let options: NewlinesInsideGroupsConfig = parse_rule_options(name, options);
                self.vue_script_setup_newlines_inside_groups = level
                    .enabled()
                    .then(|| VueScriptSetupNewlinesInsideGroups::with_config(options));
                VueScriptSetupNewlinesInsideGroups::NAME
            }
            name if name == PiniaSetupNewlinesInsideGroups::NAME => {
                let options: NewlinesInsideGroupsConfig = parse_rule_options(name, options);
                self.pinia_setup_newlines_inside_groups = level
                    .enabled()
                    .then(|| PiniaSetupNewlinesInsideGroups::with_config(options));
                PiniaSetupNewlinesInsideGroups::NAME
            }
            name if name == PiniaStyle::NAME => {
                let style: StoreStyle = parse_rule_options(name, options);
                self.pinia_style = level.enabled().then(|| PiniaStyle::new(style));
                PiniaStyle::NAME
            }
            name if name == PiniaSetupReturn::NAME => {
                self.pinia_setup_return = level.enabled();
                PiniaSetupReturn::NAME
            }
            name if name == PiniaNoFunctionExpressions::NAME => {
                self.pinia_no_function_expressions = level.enabled();
                PiniaNoFunctionExpressions::NAME
            }
            name if name == VueNoFunctionExpressions::NAME => {
                self.vue_no_function_expressions = level.enabled();
                VueNoFunctionExpressions::NAME
            }
            name if name == VueNoCompilerMacroImports::NAME => {
                self.vue_no_compiler_macro_imports = level.enabled();
                VueNoCompilerMacroImports::NAME
            }
            name if name == NewlineBeforeFirstTypeOnlyImport::NAME => {
                self.newline_before_first_type_only_import = level.enabled();
                NewlineBeforeFirstTypeOnlyImport::NAME
            }
            _ => return false,
        };

        match level {
            RuleLevel::On(severity) => {
                self.severities.insert(rule, severity);
            }
            RuleLevel::Off => {
                self.severities.remove(rule);
            }
        }
        true
    }

    pub fn with_vue_script_setup_order(mut self, rule: VueScriptSetupOrder) -> Self {
        self.vue_script_setup_order = Some(rule);
        self
    }

    pub fn with_pinia_setup_order(mut self, rule: PiniaSetupOrder) -> Self {
        self.pinia_setup_order = Some(rule);
        self
    }

    pub fn with_vue_script_setup_newlines_between_groups(
        mut self,
        rule: VueScriptSetupNewlinesBetweenGroups,
    ) -> Self {
        self.vue_script_setup_newlines_between_groups = Some(rule);
        self
    }

    pub fn with_pinia_setup_newlines_between_groups(mut self, rule: PiniaSetupNewlinesBetweenGroups) -> Self {
        self.pinia_setup_newlines_between_groups = Some(rule);
        self
    }

    pub fn with_vue_script_setup_newlines_inside_groups(
        mut self,
        rule: VueScriptSetupNewlinesInsideGroups,
    ) -> Self {
        self.vue_script_setup_newlines_inside_groups = Some(rule);
        self
    }

    pub fn with_pinia_setup_newlines_inside_groups(mut self, rule: PiniaSetupNewlinesInsideGroups) -> Self {
        self.pinia_setup_newlines_inside_groups = Some(rule);
        self
    }

    pub fn with_pinia_style(mut self, rule: PiniaStyle) -> Self {
        self.pinia_style = Some(rule);
        self
    }

    pub fn with_pinia_setup_return(mut self, enabled: bool) -> Self {
        self.pinia_setup_return = enabled;
        self
    }

    pub fn with_pinia_no_function_expressions(mut self, enabled: bool) -> Self {
        self.pinia_no_function_expressions = enabled;
        self
    }

    pub fn with_vue_no_function_expressions(mut self, enabled: bool) -> Self {
        self.vue_no_function_expressions = enabled;
        self
    }

    pub fn with_vue_no_compiler_macro_imports(mut self, enabled: bool) -> Self {
        self.vue_no_compiler_macro_imports = enabled;
        self
    }

    pub fn with_newline_before_first_type_only_import(mut self, enabled: bool) -> Self {
        self.newline_before_first_type_only_import = enabled;
        self
    }

    pub fn with_severity(mut self, rule: &'static str, severity: DiagnosticSeverity) -> Self {
        self.severities.insert(rule, severity);
        self
    }

    /// Severity reported for `rule`
    pub fn severity_of(&self, rule: &str) -> DiagnosticSeverity {
        self.severities
            .get(rule)
            .copied()
            .unwrap_or(DiagnosticSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleLevel {
    Off,
    On(DiagnosticSeverity),
}

impl RuleLevel {
    fn enabled(self) -> bool {
        matches!(self, Self::On(_))
    }

    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(level) => match level.as_str() {
                "off" => Some(Self::Off),
                "warn" => Some(Self::On(DiagnosticSeverity::Warning)),
                "error" => Some(Self::On(DiagnosticSeverity::Error)),
                _ => None,
            },
            Value::Number(level) => match level.as_u64()? {
                0 => Some(Self::Off),
                1 => Some(Self::On(DiagnosticSeverity::Warning)),
                2 => Some(Self::On(DiagnosticSeverity::Error)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// `"warn"`, `2`, or `["error", options]`
fn parse_rule_entry(entry: &Value) -> Option<(RuleLevel, Option<&Value>)> {
    match entry {
        Value::Array(items) => {
            let level = RuleLevel::parse(items.first()?)?;
            Some((level, items.get(1)))
        }
        level => Some((RuleLevel::parse(level)?, None)),
    }
}

/// Context for lint execution
pub struct VisitorLintContext<'s> {
    source_text: &'s str,
    scoping: &'s Scoping,
    script_setup: bool,
}

impl<'s> VisitorLintContext<'s> {
    pub fn new(source_text: &'s str, scoping: &'s Scoping) -> Self {
        Self {
            source_text,
            scoping,
            script_setup: false,
        }
    }

    /// Treat the whole program as the body of `<script setup>`
    pub fn with_script_setup(mut self, script_setup: bool) -> Self {
        self.script_setup = script_setup;
        self
    }

    pub fn source_text(&self) -> &'s str {
        self.source_text
    }

    pub fn scoping(&self) -> &'s Scoping {
        self.scoping
    }

    pub fn is_script_setup(&self) -> bool {
        self.script_setup
    }
}

/// Discovers definitions in one traversal, then runs every enabled rule
pub struct LintRunner<'a, 's> {
    ctx: VisitorLintContext<'s>,
    config: &'s RulesConfig,
    collector: DefinitionCollector<'a, 's>,
}

impl<'a, 's> LintRunner<'a, 's> {
    pub fn new(ctx: VisitorLintContext<'s>, config: &'s RulesConfig) -> Self {
        let resolver = ReferenceResolver::new(TraceMap::new(&config.settings), ctx.scoping());
        let collector = DefinitionCollector::new(resolver, ctx.is_script_setup());
        Self {
            ctx,
            config,
            collector,
        }
    }

    /// Run all enabled rules on the given program
    pub fn run(mut self, program: &'a Program<'a>) -> LintResult {
        self.visit_program(program);

        let Self {
            ctx,
            config,
            collector,
        } = self;
        let discovered = collector.finish();
        let mut lint_ctx = LintContext::new(ctx.source_text()).with_comments(program);
        let mut diagnostics = Vec::new();

        if ctx.is_script_setup() {
            if config.vue_no_function_expressions {
                diagnostics.extend(VueNoFunctionExpressions::new().check(program));
            }
            if config.vue_no_compiler_macro_imports {
                diagnostics.extend(VueNoCompilerMacroImports::new().check(program));
            }
        }
        if config.newline_before_first_type_only_import {
            NewlineBeforeFirstTypeOnlyImport::new().check(&mut lint_ctx, program);
        }

        for call in &discovered.store_calls {
            if let Some(rule) = &config.pinia_style {
                diagnostics.extend(rule.check(call));
            }
            if config.pinia_setup_return {
                diagnostics.extend(PiniaSetupReturn::new().check(call));
            }
            if config.pinia_no_function_expressions {
                diagnostics.extend(PiniaNoFunctionExpressions::new().check(call));
            }
        }

        for instance in &discovered.definitions {
            if let Some(rule) = &config.vue_script_setup_order {
                rule.check(&mut lint_ctx, instance);
            }
            if let Some(rule) = &config.pinia_setup_order {
                rule.check(&mut lint_ctx, instance);
            }
            if let Some(rule) = &config.vue_script_setup_newlines_between_groups {
                rule.check(&mut lint_ctx, instance);
            }
            if let Some(rule) = &config.pinia_setup_newlines_between_groups {
                rule.check(&mut lint_ctx, instance);
            }
            if let Some(rule) = &config.vue_script_setup_newlines_inside_groups {
                rule.check(&mut lint_ctx, instance);
            }
            if let Some(rule) = &config.pinia_setup_newlines_inside_groups {
                rule.check(&mut lint_ctx, instance);
            }
        }

        diagnostics.extend(lint_ctx.into_diagnostics());
        for diagnostic in &mut diagnostics {
            diagnostic.severity = config.severity_of(&diagnostic.rule);
        }
        diagnostics.sort_by(|a, b| (a.start, a.end, &a.rule).cmp(&(b.start, b.end, &b.rule)));

        LintResult { diagnostics }
    }
}

impl<'a> Visit<'a> for LintRunner<'a, '_> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        self.collector.enter(kind);
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        self.collector.leave(kind);
    }
}

/// Result of running the linter
#[derive(Debug, Default)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
            .count()
    }
}

/// Convenience function to lint a module with default configuration
pub fn lint<'a>(source_text: &'a str, program: &'a Program<'a>) -> LintResult {
    lint_with_config(source_text, program, &RulesConfig::default(), false)
}

/// Lint a program with custom configuration.
///
/// `script_setup` marks the program as the content of a `<script setup>` block.
pub fn lint_with_config<'a>(
    source_text: &'a str,
    program: &'a Program<'a>,
    config: &RulesConfig,
    script_setup: bool,
) -> LintResult {
    let semantic = SemanticBuilder::new().build(program).semantic;
    let ctx = VisitorLintContext::new(source_text, semantic.scoping())
        .with_script_setup(script_setup);
    LintRunner::new(ctx, config).run(program)
}
