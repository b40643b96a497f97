use crate::download::MirrorOptions;
use crate::lockfile::Lockfile;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MirrorParams {
    pub lockfile: Lockfile,
    pub lockfile_path: PathBuf,
    pub options: MirrorOptions,
    /// Error log file; stderr when `None`
    pub err_log_path: Option<PathBuf>,
}
