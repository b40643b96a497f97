use serde::Deserialize;
use std::path::PathBuf;

/// Optional defaults for the command-line options, read from a config file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfig {
    /// Registry base URL
    pub repo: Option<String>,
    /// Mirror output directory
    pub output: Option<PathBuf>,
    pub overwrite: Option<bool>,
    pub exit_on_error: Option<bool>,
    /// Error log file; stderr when unset
    pub err_log: Option<PathBuf>,
}
