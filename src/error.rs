use std::path::PathBuf;

use common::SfcError;
use thiserror::Error;

/// Failure to lint a file or to load a config file
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {}", messages.join("; "))]
    Parse { path: String, messages: Vec<String> },
    #[error(transparent)]
    Sfc(#[from] SfcError),
    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
