//! Definition discovery during the single traversal
//!
//! The collector keeps the ancestor path of the node being visited. A
//! `<script setup>` program is opened as a definition on entry; a traced
//! `defineStore` call with a setup function is opened when the call is
//! entered, before its body is walked. Every other traced call is merged into
//! the definition whose body holds it as a root expression.

use oxc_ast::ast::CallExpression;
use oxc_ast::AstKind;
use oxc_span::{GetSpan, Span};

use common::check::{is_variable_declaration, store_setup_body, AncestorPath};

use crate::groups::aggregate::DefinitionSet;
use crate::groups::{DefinitionInstance, DefinitionKind, GroupName};
use crate::trace::{ReferenceResolver, TraceTarget};

/// What one traversal found
#[derive(Debug, Default)]
pub struct Discovered<'a> {
    /// Finalized definitions, empty ones dropped
    pub definitions: Vec<DefinitionInstance>,
    /// Every traced `defineStore` call, valid setup or not
    pub store_calls: Vec<&'a CallExpression<'a>>,
}

pub struct DefinitionCollector<'a, 's> {
    resolver: ReferenceResolver<'s>,
    script_setup: bool,
    path: Vec<AstKind<'a>>,
    definitions: DefinitionSet,
    store_calls: Vec<&'a CallExpression<'a>>,
}

impl<'a, 's> DefinitionCollector<'a, 's> {
    pub fn new(resolver: ReferenceResolver<'s>, script_setup: bool) -> Self {
        Self {
            resolver,
            script_setup,
            path: Vec::new(),
            definitions: DefinitionSet::new(),
            store_calls: Vec::new(),
        }
    }

    pub fn enter(&mut self, kind: AstKind<'a>) {
        self.path.push(kind);
        match kind {
            AstKind::Program(program) => {
                self.resolver.collect_imports(program);
                if self.script_setup {
                    self.definitions
                        .open(DefinitionKind::ScriptSetup, program.span, &program.body);
                }
            }
            AstKind::CallExpression(call) => self.enter_call(call),
            _ => {}
        }
    }

    pub fn leave(&mut self, _kind: AstKind<'a>) {
        self.path.pop();
    }

    fn enter_call(&mut self, call: &'a CallExpression<'a>) {
        let Some(target) = self.resolver.resolve_call(call) else {
            return;
        };

        match target {
            TraceTarget::DefineStore => {
                self.store_calls.push(call);
                match store_setup_body(call) {
                    Some(body) => {
                        self.definitions
                            .open(DefinitionKind::Store, call.span, &body.statements);
                    }
                    None => tracing::trace!(span = ?call.span, "defineStore call is not a setup store"),
                }
            }
            TraceTarget::Group(group) => {
                let path = AncestorPath::new(&self.path);
                // defineExpose / defineOptions only count as statements
                if matches!(group, GroupName::DefineExpose | GroupName::DefineOptions)
                    && !path.is_statement_call()
                {
                    tracing::trace!(span = ?call.span, %group, "macro call is not a statement");
                    return;
                }
                let declaration = declaring_declarator(path);
                self.definitions
                    .merge_traced(call.span, group, call.span, declaration);
            }
        }
    }

    pub fn finish(self) -> Discovered<'a> {
        Discovered {
            definitions: self.definitions.finish(),
            store_calls: self.store_calls,
        }
    }
}

/// Span of the variable declarator enclosing the path's node
fn declaring_declarator(path: AncestorPath) -> Option<Span> {
    let found = path.nearest_ancestor(is_variable_declaration)?;
    match found.node()? {
        kind @ AstKind::VariableDeclarator(_) => Some(kind.span()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupMember;
    use crate::trace::TraceMap;
    use oxc_allocator::Allocator;
    use oxc_ast_visit::Visit;
    use oxc_parser::Parser;
    use oxc_semantic::SemanticBuilder;
    use oxc_span::SourceType;

    struct Walker<'a, 's>(DefinitionCollector<'a, 's>);

    impl<'a, 's> Visit<'a> for Walker<'a, 's> {
        fn enter_node(&mut self, kind: AstKind<'a>) {
            self.0.enter(kind);
        }

        fn leave_node(&mut self, kind: AstKind<'a>) {
            self.0.leave(kind);
        }
    }

    fn discover(source: &str, script_setup: bool) -> Vec<DefinitionInstance> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let semantic = SemanticBuilder::new().build(&ret.program).semantic;
        let resolver = ReferenceResolver::new(TraceMap::default(), semantic.scoping());

        let mut walker = Walker(DefinitionCollector::new(resolver, script_setup));
        walker.visit_program(&ret.program);
        walker.0.finish().definitions
    }

    fn lines_of(source: &str, members: &[GroupMember]) -> Vec<usize> {
        let lines = common::SourceLines::new(source);
        members.iter().map(|member| lines.line_of(member.start())).collect()
    }

    #[test]
    fn test_store_members_are_grouped() {
        let source = "\
import { defineStore } from 'pinia';
import { computed, watch } from 'vue';

export const useStore = defineStore('store', () => {
  const count = ref(0);
  const double = computed(() => count.value * 2);
  watch(count, () => {});
  function increment() {
    count.value += 1;
  }
  return { count, double, increment };
});
";
        let definitions = discover(source, false);
        assert_eq!(definitions.len(), 1);
        let groups = &definitions[0].groups;
        assert_eq!(definitions[0].kind, DefinitionKind::Store);
        assert_eq!(lines_of(source, groups.get(GroupName::States)), vec![5]);
        assert_eq!(lines_of(source, groups.get(GroupName::ComputedProperties)), vec![6]);
        assert_eq!(lines_of(source, groups.get(GroupName::Watchers)), vec![7]);
        assert_eq!(lines_of(source, groups.get(GroupName::Methods)), vec![8]);
    }

    #[test]
    fn test_nested_traced_calls_are_ignored() {
        let source = "\
import { defineStore } from 'pinia';
import { computed } from 'vue';

defineStore('store', () => {
  function make() {
    return computed(() => 1);
  }
  const wrapped = identity(computed(() => 2));
});
";
        let definitions = discover(source, false);
        let groups = &definitions[0].groups;
        assert!(groups.get(GroupName::ComputedProperties).is_empty());
        assert_eq!(groups.get(GroupName::States).len(), 1);
        assert_eq!(groups.get(GroupName::Methods).len(), 1);
    }

    #[test]
    fn test_invalid_and_empty_stores_are_dropped() {
        let source = "\
import { defineStore } from 'pinia';
defineStore('options', { state: () => ({}) });
defineStore('arrow', () => ({}));
defineStore('empty', () => {
  return {};
});
";
        assert!(discover(source, false).is_empty());
    }

    #[test]
    fn test_script_setup_macros() {
        let source = "\
import { computed } from 'vue';
const props = withDefaults(defineProps<{ a?: number }>(), { a: 1 });
const emit = defineEmits(['change']);
const doubled = computed(() => props.a * 2);
defineExpose({ doubled });
";
        let definitions = discover(source, true);
        let groups = &definitions[0].groups;
        assert_eq!(definitions[0].kind, DefinitionKind::ScriptSetup);
        assert_eq!(lines_of(source, groups.get(GroupName::Imports)), vec![1]);
        assert_eq!(lines_of(source, groups.get(GroupName::DefineProps)), vec![2]);
        assert_eq!(lines_of(source, groups.get(GroupName::DefineEmits)), vec![3]);
        assert_eq!(lines_of(source, groups.get(GroupName::ComputedProperties)), vec![4]);
        assert_eq!(lines_of(source, groups.get(GroupName::DefineExpose)), vec![5]);
        assert!(groups.get(GroupName::States).is_empty());
    }

    #[test]
    fn test_shared_declaration_keeps_untraced_declarators() {
        let source = "\
import { defineStore } from 'pinia';
import { computed } from 'vue';

defineStore('store', () => {
  const a = ref(0), b = computed(() => 2);
  return { a, b };
});
";
        let definitions = discover(source, false);
        let groups = &definitions[0].groups;
        assert_eq!(groups.get(GroupName::States).len(), 1);
        assert_eq!(groups.get(GroupName::ComputedProperties).len(), 1);
        assert!(groups.get(GroupName::States)[0].start() < groups.get(GroupName::ComputedProperties)[0].start());
    }

    #[test]
    fn test_plain_module_has_no_script_setup_definition() {
        let source = "import { computed } from 'vue';\nconst a = computed(() => 1);\n";
        assert!(discover(source, false).is_empty());
    }
}
