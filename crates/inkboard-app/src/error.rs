use inkboard_core::DocumentError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the command-line session runner.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene document: {0}")]
    Document(#[from] DocumentError),
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid event script: {0}")]
    Script(#[source] serde_json::Error),
    #[error("step {index}: {message}")]
    Step { index: usize, message: String },
}

pub type AppResult<T> = Result<T, AppError>;
