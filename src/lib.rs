//! Programic OXC linter
//!
//! File-level entry points over `programic-linter`. Script modules are linted
//! as a whole. `.vue` components are split into their `<script>` blocks; the
//! `<script setup>` block is linted as a script setup definition and every
//! reported offset is moved back into the component file.
//!
//! ## Usage
//!
//! ```rust
//! use programic_oxc::{lint_source, RulesConfig};
//!
//! let source = "<script setup lang=\"ts\">\nfunction reset() {}\nconst count = ref(0);\n</script>\n";
//! let diagnostics = lint_source(source, "Counter.vue", &RulesConfig::default()).unwrap();
//! assert!(diagnostics.iter().any(|d| d.rule == "vue-script-setup-order"));
//! ```

mod error;

#[cfg(feature = "napi")]
use napi_derive::napi;

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Serialize;

use common::{parse_scripts, SourceLines};
use programic_linter::lint_with_config;

pub use error::LintError;
pub use programic_linter::{Diagnostic, DiagnosticSeverity, Fix, RulesConfig};

pub const CONFIG_FILE_NAME: &str = "programic-lint.json";

/// Extensions of the files the CLI picks up in directories
pub const LINTABLE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts", "jsx", "tsx", "vue"];

pub fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LINTABLE_EXTENSIONS.contains(&ext))
}

/// Lint one file's source. `filename` selects the language and SFC handling.
pub fn lint_source(source: &str, filename: &str, config: &RulesConfig) -> Result<Vec<Diagnostic>, LintError> {
    if !filename.ends_with(".vue") {
        let source_type = SourceType::from_path(filename).unwrap_or_else(|_| SourceType::ts());
        return lint_script(source, filename, source_type, config, false);
    }

    let scripts = parse_scripts(source)?;
    let mut diagnostics = Vec::new();
    for block in scripts.blocks() {
        let found = lint_script(block.content, filename, block_source_type(block.lang), config, block.setup)?;
        diagnostics.extend(found.into_iter().map(|diagnostic| diagnostic.shifted(block.offset)));
    }
    tracing::debug!(filename, diagnostics = diagnostics.len(), "linted component");
    Ok(diagnostics)
}

fn block_source_type(lang: Option<&str>) -> SourceType {
    match lang {
        Some("ts") => SourceType::ts(),
        Some("tsx") => SourceType::tsx(),
        Some("jsx") => SourceType::jsx(),
        _ => SourceType::mjs(),
    }
}

fn lint_script(
    source: &str,
    filename: &str,
    source_type: SourceType,
    config: &RulesConfig,
    script_setup: bool,
) -> Result<Vec<Diagnostic>, LintError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(LintError::Parse {
            path: filename.to_string(),
            messages: ret.errors.iter().map(ToString::to_string).collect(),
        });
    }
    Ok(lint_with_config(source, &ret.program, config, script_setup).diagnostics)
}

/// A diagnostic with its 1-based line and column
#[derive(Debug, Clone, Serialize)]
pub struct LocatedDiagnostic {
    pub line: usize,
    pub column: usize,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Diagnostics of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<LocatedDiagnostic>,
}

impl FileReport {
    pub fn new(path: PathBuf, source: &str, diagnostics: Vec<Diagnostic>) -> Self {
        let lines = SourceLines::new(source);
        let diagnostics = diagnostics
            .into_iter()
            .map(|diagnostic| LocatedDiagnostic {
                line: lines.line_of(diagnostic.start),
                column: lines.column_of(diagnostic.start),
                diagnostic,
            })
            .collect();
        Self { path, diagnostics }
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|located| located.diagnostic.severity == severity)
            .count()
    }

    /// `path:line:col: severity [rule] message`, one diagnostic per line
    pub fn format_pretty(&self) -> String {
        let mut out = String::new();
        for located in &self.diagnostics {
            let diagnostic = &located.diagnostic;
            out.push_str(&format!(
                "{}:{}:{}: {} [{}] {}\n",
                self.path.display(),
                located.line,
                located.column,
                diagnostic.severity.as_str(),
                diagnostic.rule,
                diagnostic.message
            ));
            if let Some(help) = &diagnostic.help {
                out.push_str(&format!("  help: {help}\n"));
            }
        }
        out
    }
}

/// Read and lint one file
pub fn lint_path(path: &Path, config: &RulesConfig) -> Result<FileReport, LintError> {
    let source = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let diagnostics = lint_source(&source, &path.to_string_lossy(), config)?;
    Ok(FileReport::new(path.to_path_buf(), &source, diagnostics))
}

/// Nearest `programic-lint.json` in `start` or one of its ancestors
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_dir() { Some(start) } else { start.parent() };
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

/// Load a config file. Only unreadable or non-JSON files are errors; invalid
/// settings and rule options fall back to their defaults.
pub fn load_config(path: &Path) -> Result<RulesConfig, LintError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|error| LintError::Config {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    if !value.is_object() {
        return Err(LintError::Config {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    }
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(RulesConfig::from_value(&value))
}

/// A proposed fix, as seen from JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsFix {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
    pub message: Option<String>,
}

/// A diagnostic, as seen from JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsDiagnostic {
    pub rule: String,
    /// "error" or "warning"
    pub severity: String,
    pub message: String,
    pub help: Option<String>,
    pub line: u32,
    pub column: u32,
    pub start: u32,
    pub end: u32,
    pub fixes: Vec<JsFix>,
}

#[cfg(feature = "napi")]
impl From<LocatedDiagnostic> for JsDiagnostic {
    fn from(located: LocatedDiagnostic) -> Self {
        let diagnostic = located.diagnostic;
        Self {
            severity: diagnostic.severity.as_str().to_string(),
            line: located.line as u32,
            column: located.column as u32,
            start: diagnostic.start,
            end: diagnostic.end,
            fixes: diagnostic
                .fixes
                .into_iter()
                .map(|fix| JsFix {
                    start: fix.start,
                    end: fix.end,
                    replacement: fix.replacement,
                    message: fix.message,
                })
                .collect(),
            rule: diagnostic.rule,
            message: diagnostic.message,
            help: diagnostic.help,
        }
    }
}

/// Lint a source file; `config_json` has the shape of `programic-lint.json`
#[cfg(feature = "napi")]
#[napi]
pub fn lint(source: String, filename: String, config_json: Option<String>) -> napi::Result<Vec<JsDiagnostic>> {
    let config = match config_json {
        Some(json) => {
            let value: serde_json::Value =
                serde_json::from_str(&json).map_err(|error| napi::Error::from_reason(error.to_string()))?;
            RulesConfig::from_value(&value)
        }
        None => RulesConfig::default(),
    };
    let diagnostics =
        lint_source(&source, &filename, &config).map_err(|error| napi::Error::from_reason(error.to_string()))?;
    let report = FileReport::new(PathBuf::from(filename), &source, diagnostics);
    Ok(report.diagnostics.into_iter().map(JsDiagnostic::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"<template>
  <div>{{ count }}</div>
</template>

<script lang="ts">
export default { name: 'Counter' };
</script>

<script setup lang="ts">
import { computed } from 'vue';
function reset() {}
const count = ref(0);
</script>
"#;

    fn rules(source: &str, filename: &str) -> Vec<(usize, String)> {
        let diagnostics = lint_source(source, filename, &RulesConfig::default()).unwrap();
        let report = FileReport::new(PathBuf::from(filename), source, diagnostics);
        report
            .diagnostics
            .into_iter()
            .map(|located| (located.line, located.diagnostic.rule))
            .collect()
    }

    #[test]
    fn test_component_offsets_point_into_the_file() {
        let found = rules(COMPONENT, "Counter.vue");
        assert!(found.contains(&(12, "vue-script-setup-order".to_string())));
    }

    #[test]
    fn test_plain_script_is_not_script_setup() {
        let source = "import { computed } from 'vue';\nfunction reset() {}\nconst count = ref(0);\n";
        let found = rules(source, "counter.ts");
        assert!(found.iter().all(|(_, rule)| !rule.starts_with("vue-script-setup")));
    }

    #[test]
    fn test_parse_errors_are_reported_per_file() {
        let error = lint_source("const = ;", "broken.ts", &RulesConfig::default()).unwrap_err();
        assert!(matches!(error, LintError::Parse { ref path, .. } if path == "broken.ts"));
    }

    #[test]
    fn test_unterminated_script_block() {
        let error = lint_source("<script setup>\nconst a = 1;\n", "Broken.vue", &RulesConfig::default())
            .unwrap_err();
        assert!(matches!(error, LintError::Sfc(_)));
    }

    #[test]
    fn test_format_pretty() {
        let source = "\
import { defineStore } from 'pinia';
defineStore('s', { state: () => ({}) });
";
        let diagnostics = lint_source(source, "store.ts", &RulesConfig::default()).unwrap();
        let report = FileReport::new(PathBuf::from("store.ts"), source, diagnostics);
        insta::assert_snapshot!(
            report.format_pretty().trim_end(),
            @"store.ts:2:18: warning [pinia-style] Stores must be defined in the Composition API style"
        );
    }

    #[test]
    fn test_lintable_extensions() {
        assert!(is_lintable(Path::new("src/App.vue")));
        assert!(is_lintable(Path::new("store.mts")));
        assert!(!is_lintable(Path::new("README.md")));
        assert!(!is_lintable(Path::new("Makefile")));
    }
}
