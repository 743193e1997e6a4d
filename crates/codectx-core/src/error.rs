//! Error types shared by the scanner crates

use std::path::PathBuf;

/// Errors that abort a whole scan or reject its configuration.
///
/// File-level and manifest-level failures are not represented here; those
/// are logged and skipped by the indexer.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Repository root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Repository root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type ScanResult<T> = Result<T, ScanError>;
