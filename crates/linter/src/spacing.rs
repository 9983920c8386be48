//! Blank line counting and spacing checks between group members

use oxc_span::Span;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Fix};
use crate::groups::GroupMember;
use crate::LintContext;

/// Whitespace-only lines strictly between the end line of `a` and the start
/// line of `b`.
///
/// With `ignore_comments`, lines covered by a comment lying entirely between
/// the two lines are skipped, so a blank line inside a block comment does not
/// count. Adjacent lines give zero.
pub fn count_blank_lines_between(ctx: &LintContext, a: Span, b: Span, ignore_comments: bool) -> usize {
    let lines = ctx.lines();
    let end_line = lines.end_line(a);
    let start_line = lines.start_line(b);
    if start_line <= end_line + 1 {
        return 0;
    }

    let comment_lines: Vec<(usize, usize)> = if ignore_comments {
        ctx.comments_within(Span::new(a.end, b.start))
            .map(|comment| (lines.start_line(comment), lines.end_line(comment)))
            .filter(|(first, last)| *first > end_line && *last < start_line)
            .collect()
    } else {
        Vec::new()
    };

    (end_line + 1..start_line)
        .filter(|line| {
            !comment_lines
                .iter()
                .any(|(first, last)| (*first..=*last).contains(line))
        })
        .filter(|line| lines.line_text(*line).trim().is_empty())
        .count()
}

/// Expected blank lines, by whether each of the two items spans one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlinesPolicy {
    #[serde(default, rename = "numberOfNewlinesBetweenSingleLineItems")]
    pub single: u32,
    #[serde(default, rename = "numberOfNewlinesBetweenSingleAndMultiLineItems")]
    pub mixed: u32,
    #[serde(default, rename = "numberOfNewlinesBetweenMultiLineItems")]
    pub multi: u32,
}

impl NewlinesPolicy {
    pub fn expected(&self, ctx: &LintContext, a: Span, b: Span) -> u32 {
        let lines = ctx.lines();
        match (lines.is_single_line(a), lines.is_single_line(b)) {
            (true, true) => self.single,
            (false, false) => self.multi,
            _ => self.mixed,
        }
    }
}

/// Replace the text between two statements so exactly `expected` blank
/// lines separate them.
///
/// Only offered when that text is whitespace; anything else (comments) would
/// be lost by the replacement.
pub fn spacing_fix(ctx: &LintContext, a: Span, b: Span, expected: u32) -> Option<Fix> {
    if a.end > b.start {
        return None;
    }
    let between = ctx.span_text(Span::new(a.end, b.start));
    if !between.trim().is_empty() {
        return None;
    }

    let newline = if between.contains("\r\n") { "\r\n" } else { "\n" };
    let lines = ctx.lines();
    let next_line = lines.line_text(lines.start_line(b));
    let indentation: String = next_line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let replacement = format!("{}{}", newline.repeat(expected as usize + 1), indentation);
    (replacement != between).then(|| {
        Fix::new(Span::new(a.end, b.start), replacement).with_message(format!(
            "Use exactly {expected} {}",
            newlines_word(expected)
        ))
    })
}

pub fn newlines_word(count: u32) -> &'static str {
    if count == 1 {
        "newline"
    } else {
        "newlines"
    }
}

/// Compare the spacing of two consecutive members and report on `next`.
///
/// Spacing is measured between their root statements. Members sharing a
/// statement (`const a = computed(), b = computed()`) are not compared.
pub fn check_member_spacing(
    ctx: &mut LintContext,
    rule: &'static str,
    previous: &GroupMember,
    next: &GroupMember,
    expected: u32,
    message: impl FnOnce(u32, usize) -> String,
) {
    if previous.statement == next.statement {
        return;
    }
    let actual = count_blank_lines_between(ctx, previous.statement, next.statement, true);
    if actual == expected as usize {
        return;
    }

    let fix = spacing_fix(ctx, previous.statement, next.statement, expected);
    let diagnostic = Diagnostic::warning(rule, next.span, message(expected, actual))
        .with_optional_fix(fix);
    ctx.report(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::{GetSpan, SourceType};

    /// Spans of the first two statements, with a context carrying comments
    fn with_statements(source: &str, check: impl FnOnce(&LintContext, Span, Span)) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let ctx = LintContext::new(source).with_comments(&ret.program);
        check(&ctx, ret.program.body[0].span(), ret.program.body[1].span());
    }

    #[test]
    fn test_adjacent_lines_have_no_blank_lines() {
        with_statements("const a = 1;\nconst b = 2;\n", |ctx, a, b| {
            assert_eq!(count_blank_lines_between(ctx, a, b, true), 0);
            assert_eq!(count_blank_lines_between(ctx, a, b, false), 0);
        });
        with_statements("const a = 1; const b = 2;", |ctx, a, b| {
            assert_eq!(count_blank_lines_between(ctx, a, b, true), 0);
        });
    }

    #[test]
    fn test_blank_lines_counted_with_or_without_comments() {
        with_statements("const a = 1;\n\n  \n\nconst b = 2;\n", |ctx, a, b| {
            assert_eq!(count_blank_lines_between(ctx, a, b, true), 3);
            assert_eq!(count_blank_lines_between(ctx, a, b, false), 3);
        });
    }

    #[test]
    fn test_comment_lines_are_transparent() {
        let source = "const a = 1;\n\n/*\n\n*/\n\nconst b = 2;\n";
        with_statements(source, |ctx, a, b| {
            assert_eq!(count_blank_lines_between(ctx, a, b, true), 2);
            // the blank line inside the block comment counts without ignoring comments
            assert_eq!(count_blank_lines_between(ctx, a, b, false), 3);
        });
    }

    #[test]
    fn test_policy_by_line_shape() {
        let policy = NewlinesPolicy { single: 0, mixed: 1, multi: 2 };
        with_statements("const a = 1;\nfunction f() {\n}\n", |ctx, a, b| {
            assert_eq!(policy.expected(ctx, a, a), 0);
            assert_eq!(policy.expected(ctx, a, b), 1);
            assert_eq!(policy.expected(ctx, b, b), 2);
        });
    }

    #[test]
    fn test_fix_keeps_indentation() {
        with_statements("{\n}\nconst a = 1;\n    const b = 2;", |ctx, _, _| {
            let a = Span::new(4, 16);
            let b = Span::new(21, 33);
            let fix = spacing_fix(ctx, a, b, 1).unwrap();
            assert_eq!(fix.span(), Span::new(16, 21));
            assert_eq!(fix.replacement, "\n\n    ");
        });
    }

    #[test]
    fn test_no_fix_across_comments_or_when_correct() {
        with_statements("const a = 1;\n// note\nconst b = 2;\n", |ctx, a, b| {
            assert!(spacing_fix(ctx, a, b, 1).is_none());
        });
        with_statements("const a = 1;\n\nconst b = 2;\n", |ctx, a, b| {
            assert!(spacing_fix(ctx, a, b, 1).is_none());
        });
    }

    #[test]
    fn test_crlf_is_preserved() {
        with_statements("const a = 1;\r\nconst b = 2;\r\n", |ctx, a, b| {
            let fix = spacing_fix(ctx, a, b, 1).unwrap();
            assert_eq!(fix.replacement, "\r\n\r\n");
        });
    }
}
