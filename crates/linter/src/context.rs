//! Lint context for rule execution

use oxc_ast::ast::Program;
use oxc_span::Span;

use common::SourceLines;

use crate::Diagnostic;

/// Context passed to rules during linting
pub struct LintContext<'s> {
    /// Source code being linted
    source_text: &'s str,
    /// Line index over `source_text`
    lines: SourceLines<'s>,
    /// Spans of every comment, in source order
    comments: Vec<Span>,
    /// Collected diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl<'s> LintContext<'s> {
    pub fn new(source_text: &'s str) -> Self {
        Self {
            source_text,
            lines: SourceLines::new(source_text),
            comments: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Take the comment spans from a parsed program
    pub fn with_comments(mut self, program: &Program) -> Self {
        self.comments = program.comments.iter().map(|comment| comment.span).collect();
        self
    }

    pub fn lines(&self) -> &SourceLines<'s> {
        &self.lines
    }

    /// Comments that lie entirely inside `span`
    pub fn comments_within(&self, span: Span) -> impl Iterator<Item = Span> + '_ {
        self.comments
            .iter()
            .copied()
            .filter(move |comment| comment.start >= span.start && comment.end <= span.end)
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get a slice of source text for a span
    pub fn span_text(&self, span: Span) -> &'s str {
        &self.source_text[span.start as usize..span.end as usize]
    }

    /// Consume the context and return all diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
