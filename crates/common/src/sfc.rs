//! `<script>` block extraction from Vue single-file components
//!
//! Only the script blocks matter to the linter, so this is a scanner rather
//! than a full SFC parser: top-level tags are found with `memchr`, the
//! `<template>` block is skipped as a whole (nested templates included), and
//! every block keeps its byte offset so diagnostics can be shifted back into
//! the `.vue` file.

use memchr::memchr;
use thiserror::Error;

const TAG_SCRIPT: &str = "script";
const TAG_TEMPLATE: &str = "template";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SfcError {
    #[error("unterminated <{tag}> block starting at byte {offset}")]
    Unterminated { tag: String, offset: usize },
    #[error("SFC can only contain one <script setup> block")]
    DuplicateScriptSetup,
    #[error("SFC can only contain one <script> block")]
    DuplicateScript,
}

/// One `<script>` block of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    pub content: &'a str,
    /// Byte offset of `content` within the component source
    pub offset: u32,
    pub lang: Option<&'a str>,
    pub setup: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SfcScripts<'a> {
    pub script: Option<ScriptBlock<'a>>,
    pub script_setup: Option<ScriptBlock<'a>>,
}

impl<'a> SfcScripts<'a> {
    /// Blocks in source order
    pub fn blocks(&self) -> impl Iterator<Item = &ScriptBlock<'a>> {
        let mut blocks: Vec<_> = self.script.iter().chain(self.script_setup.iter()).collect();
        blocks.sort_by_key(|block| block.offset);
        blocks.into_iter()
    }
}

/// Find the `<script>` and `<script setup>` blocks of a component
pub fn parse_scripts(source: &str) -> Result<SfcScripts<'_>, SfcError> {
    let bytes = source.as_bytes();
    let mut scripts = SfcScripts::default();
    let mut pos = 0;

    while let Some(next_lt) = memchr(b'<', &bytes[pos..]) {
        let start = pos + next_lt;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            pos = rest.find("-->").map_or(bytes.len(), |end| start + end + 3);
            continue;
        }

        let name_start = start + 1;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-')
            .count();
        if name_len == 0 {
            // closing tag or a stray '<'
            pos = name_start;
            continue;
        }
        let name_end = name_start + name_len;
        let name = &source[name_start..name_end];

        let Some(gt) = memchr(b'>', &bytes[name_end..]) else {
            break;
        };
        let tag_end = name_end + gt;
        let attrs = &source[name_end..tag_end];
        let content_start = tag_end + 1;
        if attrs.trim_end().ends_with('/') {
            pos = content_start;
            continue;
        }

        let content_end = if name.eq_ignore_ascii_case(TAG_TEMPLATE) {
            find_template_end(source, content_start)
        } else {
            source[content_start..]
                .find(&format!("</{name}"))
                .map(|index| content_start + index)
        };
        let Some(content_end) = content_end else {
            if name.eq_ignore_ascii_case(TAG_SCRIPT) {
                return Err(SfcError::Unterminated {
                    tag: name.to_string(),
                    offset: start,
                });
            }
            break;
        };

        if name.eq_ignore_ascii_case(TAG_SCRIPT) {
            let block = ScriptBlock {
                content: &source[content_start..content_end],
                offset: content_start as u32,
                lang: attribute(attrs, "lang").flatten(),
                setup: attribute(attrs, "setup").is_some(),
            };
            let slot = if block.setup {
                &mut scripts.script_setup
            } else {
                &mut scripts.script
            };
            if slot.is_some() {
                return Err(if block.setup {
                    SfcError::DuplicateScriptSetup
                } else {
                    SfcError::DuplicateScript
                });
            }
            *slot = Some(block);
        }

        pos = memchr(b'>', &bytes[content_end..]).map_or(bytes.len(), |gt| content_end + gt + 1);
    }

    Ok(scripts)
}

/// Offset of the `</template>` closing the block whose content starts at `from`
fn find_template_end(source: &str, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = from;
    loop {
        let rest = &source[pos..];
        let open = rest.find("<template");
        let close = rest.find("</template")?;
        match open {
            Some(open) if open < close => {
                depth += 1;
                pos += open + "<template".len();
            }
            _ => {
                if depth == 0 {
                    return Some(pos + close);
                }
                depth -= 1;
                pos += close + "</template".len();
            }
        }
    }
}

/// Look up an attribute in the text between a tag name and its `>`.
///
/// `None` when absent, `Some(None)` for a bare attribute like `setup`.
fn attribute<'a>(attrs: &'a str, wanted: &str) -> Option<Option<&'a str>> {
    let bytes = attrs.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        let name_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && bytes[pos] != b'='
            && bytes[pos] != b'/'
        {
            pos += 1;
        }
        let name = &attrs[name_start..pos];
        if name.is_empty() {
            break;
        }

        let mut value = None;
        if pos < bytes.len() && bytes[pos] == b'=' {
            pos += 1;
            let quote = bytes.get(pos).copied().filter(|b| *b == b'"' || *b == b'\'');
            if let Some(quote) = quote {
                pos += 1;
                let value_start = pos;
                pos += memchr(quote, &bytes[pos..]).unwrap_or(bytes.len() - pos);
                value = Some(&attrs[value_start..pos]);
                pos += 1;
            } else {
                let value_start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                value = Some(&attrs[value_start..pos]);
            }
        }

        if name.eq_ignore_ascii_case(wanted) {
            return Some(value);
        }
    }
    None
}
