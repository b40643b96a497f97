use crate::download::DownloadError;
use crate::error::CrateMirrorError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Destination for the one-line reports of failed downloads.
///
/// Opened once per run and released when dropped.
pub struct ErrorLog {
    writer: Box<dyn Write + Send>,
}

impl ErrorLog {
    /// Opens `path` for writing, truncating it, or falls back to stderr.
    pub fn open(path: Option<&Path>) -> Result<Self, CrateMirrorError> {
        match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| CrateMirrorError::ErrorLogOpen {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                tracing::debug!("Writing download errors to {}", path.display());
                Ok(Self {
                    writer: Box::new(file),
                })
            }
            None => Ok(Self::stderr()),
        }
    }

    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    pub fn record(&mut self, error: &DownloadError) -> std::io::Result<()> {
        writeln!(self.writer, "{error}")?;
        self.writer.flush()
    }
}

impl std::fmt::Debug for ErrorLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorLog").finish_non_exhaustive()
    }
}
