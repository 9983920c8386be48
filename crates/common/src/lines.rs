//! Line index over a source text
//!
//! oxc spans are byte offsets; the spacing rules think in lines. `SourceLines`
//! records where every line starts once per file and answers line lookups by
//! binary search.

use oxc_span::Span;

#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    source: &'a str,
    /// Byte offset of the first character of every line
    starts: Vec<u32>,
}

impl<'a> SourceLines<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            memchr::memchr_iter(b'\n', source.as_bytes()).map(|index| index as u32 + 1),
        );
        Self { source, starts }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-based line containing `offset`
    pub fn line_of(&self, offset: u32) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }

    pub fn start_line(&self, span: Span) -> usize {
        self.line_of(span.start)
    }

    /// Line holding the last character of `span`
    pub fn end_line(&self, span: Span) -> usize {
        self.line_of(span.end.saturating_sub(1).max(span.start))
    }

    pub fn is_single_line(&self, span: Span) -> bool {
        self.start_line(span) == self.end_line(span)
    }

    /// Text of a 1-based line, without its terminator
    pub fn line_text(&self, line: usize) -> &'a str {
        let Some(&start) = self.starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self
            .starts
            .get(line)
            .map_or(self.source.len(), |&next| next as usize - 1);
        self.source[start as usize..end].trim_end_matches('\r')
    }

    /// 1-based column of `offset`, counted in bytes
    pub fn column_of(&self, offset: u32) -> usize {
        let line = self.line_of(offset);
        (offset - self.starts[line - 1]) as usize + 1
    }
}
