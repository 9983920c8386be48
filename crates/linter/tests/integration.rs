//! Integration tests for programic-linter rules

use oxc_allocator::Allocator;
use oxc_ast::AstKind;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;

use common::SourceLines;
use programic_linter::discovery::DefinitionCollector;
use programic_linter::trace::{ReferenceResolver, TraceMap};
use programic_linter::{
    lint_with_config, DefinitionInstance, Diagnostic, GroupName, NewlinesInsideGroupsConfig,
    PiniaSetupNewlinesBetweenGroups, PiniaSetupNewlinesInsideGroups, PiniaSetupOrder, RuleMeta,
    RulesConfig, VueScriptSetupNewlinesBetweenGroups, VueScriptSetupOrder,
};

fn lint(source: &str, config: &RulesConfig, script_setup: bool) -> Vec<Diagnostic> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts();
    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "should parse: {:?}", ret.errors);
    lint_with_config(source, &ret.program, config, script_setup).diagnostics
}

fn line(source: &str, offset: u32) -> usize {
    SourceLines::new(source).line_of(offset)
}

struct Walker<'a, 's>(DefinitionCollector<'a, 's>);

impl<'a> Visit<'a> for Walker<'a, '_> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        self.0.enter(kind);
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        self.0.leave(kind);
    }
}

fn discover_twice(source: &str) -> (Vec<DefinitionInstance>, Vec<DefinitionInstance>) {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
    let semantic = SemanticBuilder::new().build(&ret.program).semantic;

    let run = || {
        let resolver = ReferenceResolver::new(TraceMap::default(), semantic.scoping());
        let mut walker = Walker(DefinitionCollector::new(resolver, false));
        walker.visit_program(&ret.program);
        walker.0.finish().definitions
    };
    (run(), run())
}

// ============================================================================
// Order
// ============================================================================

#[test]
fn test_state_below_method_is_reported_once() {
    let source = "\
import { defineStore } from 'pinia';
import { computed } from 'vue';

export const useStore = defineStore('store', () => {
  function reset() {
    count.value = 0;
  }

  // state
  const count = ref(0);
  const label = ref('');

  return { count, label, reset };
});
";
    let config = RulesConfig::none().with_pinia_setup_order(PiniaSetupOrder::default());
    let diagnostics = lint(source, &config, false);

    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.rule, PiniaSetupOrder::NAME);
    assert_eq!(diagnostic.message, "States should be placed above methods");
    assert_eq!(line(source, diagnostic.start), 10);
    assert_eq!(line(source, diagnostic.labels[0].start), 5);
}

#[test]
fn test_aliased_and_namespace_imports_are_traced() {
    let source = "\
import * as vue from 'vue';
import { watch as observe } from 'vue';
import { defineStore } from 'pinia';

defineStore('store', () => {
  observe(source, () => {});
  const doubled = vue.computed(() => 2);
  const count = ref(0);
  return { doubled, count };
});
";
    let config = RulesConfig::none().with_pinia_setup_order(PiniaSetupOrder::default());
    let messages: Vec<String> = lint(source, &config, false)
        .into_iter()
        .map(|diagnostic| diagnostic.message)
        .collect();

    assert_eq!(
        messages,
        vec![
            "Computed properties should be placed above watchers".to_string(),
            "States should be placed above computed properties".to_string(),
        ]
    );
}

#[test]
fn test_shadowed_import_is_a_state() {
    let source = "\
import { computed } from 'vue';
import { defineStore } from 'pinia';

defineStore('store', () => {
  function helper() {}
  const computed = (value) => value;
  const value = computed(1);
  return { value, helper };
});
";
    let config = RulesConfig::none().with_pinia_setup_order(PiniaSetupOrder::default());
    let diagnostics = lint(source, &config, false);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "States should be placed above methods");
}

#[test]
fn test_state_sharing_a_declaration_with_computed() {
    let source = "\
import { defineStore } from 'pinia';
import { computed } from 'vue';

defineStore('store', () => {
  const c = computed(() => 1);
  const a = ref(0), b = computed(() => 2);
  return { a, b, c };
});
";
    let config = RulesConfig::none().with_pinia_setup_order(PiniaSetupOrder::default());
    let diagnostics = lint(source, &config, false);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "States should be placed above computed properties");
    assert_eq!(line(source, diagnostics[0].start), 6);
}

#[test]
fn test_each_store_is_validated_independently() {
    let source = "\
import { defineStore } from 'pinia';

export const useA = defineStore('a', () => {
  const a = ref(0);
  function inc() {}
  return { a, inc };
});

export const useB = defineStore('b', () => {
  function dec() {}
  const b = ref(0);
  return { b, dec };
});
";
    let config = RulesConfig::none().with_pinia_setup_order(PiniaSetupOrder::default());
    let diagnostics = lint(source, &config, false);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(line(source, diagnostics[0].start), 11);
}

// ============================================================================
// Spacing
// ============================================================================

#[test]
fn test_between_groups_fires_inside_groups_does_not() {
    let source = "\
defineStore('store', () => {
  const count = ref(0);
  function increment() {
    count.value += 1;
  }
  return { count, increment };
});
";
    let source = format!("import {{ defineStore }} from 'pinia';\n{source}");
    let inside = NewlinesInsideGroupsConfig {
        groups: [(GroupName::Methods, serde_json::from_value(serde_json::json!({
            "numberOfNewlinesBetweenSingleLineItems": 1,
            "numberOfNewlinesBetweenSingleAndMultiLineItems": 1,
            "numberOfNewlinesBetweenMultiLineItems": 1
        }))
        .unwrap())]
        .into_iter()
        .collect(),
        ..NewlinesInsideGroupsConfig::default()
    };
    let config = RulesConfig::none()
        .with_pinia_setup_newlines_between_groups(PiniaSetupNewlinesBetweenGroups::new())
        .with_pinia_setup_newlines_inside_groups(PiniaSetupNewlinesInsideGroups::with_config(inside));
    let diagnostics = lint(&source, &config, false);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, PiniaSetupNewlinesBetweenGroups::NAME);
    // body statements sit on lines 3 and 4 once the import is prepended
    assert_eq!(line(&source, diagnostics[0].start), 4);
    assert_eq!(
        diagnostics[0].message,
        "There must be exactly 1 newline between each group (detected 0 newlines)"
    );
    let fix = &diagnostics[0].fixes[0];
    assert_eq!(fix.replacement, "\n\n  ");
}

#[test]
fn test_interleaved_groups_skip_between_check() {
    let source = "\
import { computed } from 'vue';
const a = ref(0);
const b = computed(() => a.value);
const c = ref(1);
";
    let config = RulesConfig::none()
        .with_vue_script_setup_newlines_between_groups(VueScriptSetupNewlinesBetweenGroups::new());
    assert!(lint(source, &config, true).is_empty());
}

#[test]
fn test_comment_between_groups_is_not_fixed() {
    let source = "\
import { computed } from 'vue';

const a = ref(0);
// derived
const b = computed(() => a.value);
";
    let config = RulesConfig::none()
        .with_vue_script_setup_newlines_between_groups(VueScriptSetupNewlinesBetweenGroups::new());
    let diagnostics = lint(source, &config, true);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].fixes.is_empty());
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_empty_store_yields_no_definition() {
    let source = "\
import { defineStore } from 'pinia';
defineStore('empty', () => {
  console.log('side effect');
  return {};
});
";
    let (definitions, _) = discover_twice(source);
    assert!(definitions.is_empty());
}

#[test]
fn test_discovery_is_idempotent() {
    let source = "\
import { defineStore } from 'pinia';
import { computed, onMounted } from 'vue';
defineStore('store', () => {
  const a = ref(0);
  const b = computed(() => a.value);
  function c() {}
  return { a, b, c };
});
";
    let (first, second) = discover_twice(source);
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);

    let groups = &first[0].groups;
    assert_eq!(groups.get(GroupName::States).len(), 1);
    assert_eq!(groups.get(GroupName::ComputedProperties).len(), 1);
}

#[test]
fn test_full_run_is_repeatable() {
    let source = "\
import { computed, onMounted } from 'vue';
onMounted(() => {});
const doubled = computed(() => 2);
function reset() {}
";
    let config = RulesConfig::none().with_vue_script_setup_order(VueScriptSetupOrder::default());
    assert_eq!(lint(source, &config, true), lint(source, &config, true));
}
