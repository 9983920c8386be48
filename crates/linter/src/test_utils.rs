//! Helpers shared by the rule tests

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use common::SourceLines;

use crate::{lint_with_config, Diagnostic, RulesConfig};

/// Parse `source` as TypeScript and run `config` over it
pub fn run_rules(source: &str, config: RulesConfig, script_setup: bool) -> Vec<Diagnostic> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts();
    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "test source should parse: {:?}", ret.errors);
    lint_with_config(source, &ret.program, &config, script_setup).diagnostics
}

/// 1-based start line of every diagnostic
pub fn lines_of(source: &str, diagnostics: &[Diagnostic]) -> Vec<usize> {
    let lines = SourceLines::new(source);
    diagnostics.iter().map(|d| lines.line_of(d.start)).collect()
}
