use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateMirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Error reading {path}: no such file")]
    LockfileNotFound { path: PathBuf },

    #[error("Error reading {path}: {reason}")]
    LockfileRead { path: PathBuf, reason: String },

    #[error("Error parsing {path}: {reason}")]
    LockfileParse { path: PathBuf, reason: String },

    #[error(transparent)]
    Download(#[from] crate::download::DownloadError),

    #[error("Failed to store archive: {0:#}")]
    ArchiveStore(eyre::Report),

    #[error("Failed to open error log {path}: {reason}")]
    ErrorLogOpen { path: PathBuf, reason: String },

    #[error("Failed to write to error log: {0}")]
    ErrorLogWrite(std::io::Error),

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}
