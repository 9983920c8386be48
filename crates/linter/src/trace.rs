//! Reference tracing from module imports to call sites
//!
//! A call is traced when its callee resolves, through scope analysis, to a
//! named value import (`import { computed as c } from 'vue'`) or to a member
//! of a namespace import (`vue.computed()`) listed in the [`TraceMap`].
//! Shadowed locals never resolve to the import symbol, so they are not traced.
//!
//! `<script setup>` compiler macros are globals rather than imports: a call to
//! an unresolved identifier named like a macro is traced to the macro's group.

use oxc_ast::ast::{
    CallExpression, Expression, IdentifierReference, ImportDeclaration,
    ImportDeclarationSpecifier, Program, Statement,
};
use oxc_semantic::{Scoping, SymbolId};
use rustc_hash::{FxHashMap, FxHashSet};

use common::check::{argument_expression, inner_expression};
use common::constants::{
    COMPOSITION_API_MODULES, COMPUTED_NAMES, DEFINE_STORE, HOOK_NAMES, PINIA_MODULE,
    WATCHER_NAMES, WITH_DEFAULTS,
};
use common::is_compiler_macro;

use crate::groups::GroupName;
use crate::settings::{ExtendedNames, ResolvedSettings};

/// What a traced call stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceTarget {
    DefineStore,
    Group(GroupName),
}

/// Calls of any of `names` imported from any of `modules`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSpec {
    pub modules: Vec<String>,
    pub names: Vec<String>,
    pub target: TraceTarget,
}

impl TraceSpec {
    fn matches(&self, module: &str, name: &str) -> bool {
        self.modules.iter().any(|candidate| candidate == module)
            && self.names.iter().any(|candidate| candidate == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMap {
    specs: Vec<TraceSpec>,
}

impl TraceMap {
    pub fn new(settings: &ResolvedSettings) -> Self {
        let specs = vec![
            TraceSpec {
                modules: vec![PINIA_MODULE.to_string()],
                names: vec![DEFINE_STORE.to_string()],
                target: TraceTarget::DefineStore,
            },
            composition_spec(
                COMPUTED_NAMES,
                &settings.extended_computed_properties,
                GroupName::ComputedProperties,
            ),
            composition_spec(WATCHER_NAMES, &settings.extended_watchers, GroupName::Watchers),
            composition_spec(HOOK_NAMES, &settings.extended_hooks, GroupName::Hooks),
        ];
        Self { specs }
    }

    /// First spec matching an export `name` of `module`
    pub fn lookup(&self, module: &str, name: &str) -> Option<TraceTarget> {
        self.specs
            .iter()
            .find(|spec| spec.matches(module, name))
            .map(|spec| spec.target)
    }

    pub fn traces_module(&self, module: &str) -> bool {
        self.specs
            .iter()
            .any(|spec| spec.modules.iter().any(|candidate| candidate == module))
    }
}

impl Default for TraceMap {
    fn default() -> Self {
        Self::new(&ResolvedSettings::default())
    }
}

/// Built-in names plus the configured ones, traced from the built-in modules
/// and every configured module alike
fn composition_spec(builtin: &[&str], extended: &ExtendedNames, group: GroupName) -> TraceSpec {
    let modules = COMPOSITION_API_MODULES
        .iter()
        .map(|module| module.to_string())
        .chain(extended.keys().cloned())
        .collect();

    let mut names: Vec<String> = builtin.iter().map(|name| name.to_string()).collect();
    for name in extended.values().flatten() {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    TraceSpec {
        modules,
        names,
        target: TraceTarget::Group(group),
    }
}

/// Resolves call expressions of one file against its import bindings
pub struct ReferenceResolver<'s> {
    trace: TraceMap,
    scoping: &'s Scoping,
    /// Named value imports that are traced
    named: FxHashMap<SymbolId, TraceTarget>,
    /// Namespace imports of traced modules
    namespaces: FxHashMap<SymbolId, String>,
    /// Compiler macros imported from `vue` anyway
    macro_imports: FxHashSet<SymbolId>,
}

impl<'s> ReferenceResolver<'s> {
    pub fn new(trace: TraceMap, scoping: &'s Scoping) -> Self {
        Self {
            trace,
            scoping,
            named: FxHashMap::default(),
            namespaces: FxHashMap::default(),
            macro_imports: FxHashSet::default(),
        }
    }

    /// Record the import bindings of `program`
    pub fn collect_imports(&mut self, program: &Program) {
        for statement in &program.body {
            if let Statement::ImportDeclaration(import) = statement {
                self.add_import(import);
            }
        }
    }

    fn add_import(&mut self, import: &ImportDeclaration) {
        if import.import_kind.is_type() {
            return;
        }
        let module = import.source.value.as_str();
        let Some(specifiers) = &import.specifiers else {
            return;
        };

        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    if named.import_kind.is_type() {
                        continue;
                    }
                    let Some(symbol) = named.local.symbol_id.get() else {
                        continue;
                    };
                    let imported = named.imported.name();
                    if let Some(target) = self.trace.lookup(module, imported.as_str()) {
                        self.named.insert(symbol, target);
                    } else if module == "vue" && is_compiler_macro(imported.as_str()) {
                        self.macro_imports.insert(symbol);
                    }
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    if !self.trace.traces_module(module) {
                        continue;
                    }
                    if let Some(symbol) = namespace.local.symbol_id.get() {
                        self.namespaces.insert(symbol, module.to_string());
                    }
                }
                // default exports carry no traced names
                ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {}
            }
        }
    }

    fn symbol_of(&self, ident: &IdentifierReference) -> Option<SymbolId> {
        let reference_id = ident.reference_id.get()?;
        self.scoping.get_reference(reference_id).symbol_id()
    }

    /// What `call` stands for, if it is traced
    pub fn resolve_call(&self, call: &CallExpression) -> Option<TraceTarget> {
        match inner_expression(&call.callee) {
            Expression::Identifier(ident) => match self.symbol_of(ident) {
                Some(symbol) => {
                    if let Some(target) = self.named.get(&symbol) {
                        Some(*target)
                    } else if self.macro_imports.contains(&symbol) {
                        self.resolve_macro(ident.name.as_str(), call)
                    } else {
                        None
                    }
                }
                None => self.resolve_macro(ident.name.as_str(), call),
            },
            Expression::StaticMemberExpression(member) => {
                let Expression::Identifier(object) = inner_expression(&member.object) else {
                    return None;
                };
                let module = self.namespaces.get(&self.symbol_of(object)?)?;
                self.trace.lookup(module, member.property.name.as_str())
            }
            _ => None,
        }
    }

    /// Macro calls; `withDefaults(defineProps(...))` counts as `defineProps`
    fn resolve_macro(&self, name: &str, call: &CallExpression) -> Option<TraceTarget> {
        if name == WITH_DEFAULTS {
            let Some(Expression::CallExpression(inner)) =
                argument_expression(call, 0).map(inner_expression)
            else {
                return None;
            };
            return (self.resolve_call(inner) == Some(TraceTarget::Group(GroupName::DefineProps)))
                .then_some(TraceTarget::Group(GroupName::DefineProps));
        }
        GroupName::from_macro(name).map(TraceTarget::Group)
    }
}
