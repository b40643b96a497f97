pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod error_log;
pub mod lockfile;
pub mod progress;

pub use crate::config::MirrorConfig;
pub use crate::error::CrateMirrorError;
