use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::OnceLock;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use programic_oxc::{find_config_file, is_lintable, lint_path, load_config, FileReport, LintError, RulesConfig};

/// programic-lint CLI options.
#[derive(Debug, Parser)]
#[command(
    name = "programic-lint",
    version,
    about = "Lint Vue script setup blocks and Pinia setup stores"
)]
pub struct Args {
    /// Files/directories to lint.
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Config file. Defaults to the nearest programic-lint.json.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Exit with code 1 if any diagnostics are emitted.
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Used when `RUST_LOG` is unset. The engine logs configuration fallbacks
/// under its own target.
const DEFAULT_FILTER: &str = "programic_oxc=info,programic_linter=warn";

/// Initialize tracing subscriber once per process.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    });
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&args)?;
    let files = collect_files(&args.paths)?;
    tracing::debug!(files = files.len(), "collected files");

    let mut reports = Vec::new();
    let mut failures = 0usize;
    for file in &files {
        match lint_path(file, &config) {
            Ok(report) => reports.push(report),
            Err(error @ (LintError::Parse { .. } | LintError::Sfc(_))) => {
                failures += 1;
                eprintln!("{}: {error}", file.display());
            }
            Err(error) => return Err(error).with_context(|| format!("failed to lint {}", file.display())),
        }
    }

    match args.format {
        OutputFormat::Pretty => {
            for report in &reports {
                print!("{}", report.format_pretty());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    let errors: usize = reports.iter().map(FileReport::error_count).sum();
    let warnings: usize = reports.iter().map(FileReport::warning_count).sum();
    if matches!(args.format, OutputFormat::Pretty) && errors + warnings > 0 {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    Ok(exit_code(failures, errors, warnings, args.deny_warnings))
}

fn exit_code(failures: usize, errors: usize, warnings: usize, deny_warnings: bool) -> ExitCode {
    if failures > 0 {
        ExitCode::from(2)
    } else if errors > 0 || (deny_warnings && warnings > 0) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn resolve_config(args: &Args) -> anyhow::Result<RulesConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => args.paths.first().and_then(|start| find_config_file(start)),
    };
    match path {
        Some(path) => Ok(load_config(&path)?),
        None => Ok(RulesConfig::default()),
    }
}

fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        anyhow::ensure!(path.is_dir(), "no such file or directory: {}", path.display());
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry.path()))
        {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_lintable(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "node_modules")
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_filter_shows_config_fallbacks() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            RulesConfig::from_value(&serde_json::json!({
                "rules": { "no-such-rule": "warn" }
            }));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("unknown rule"), "captured: {output:?}");
        assert!(output.contains("no-such-rule"));
    }
}
