use crate::download::layout::RegistryUrl;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Outcome of a single archive GET.
///
/// A payload is present only for an HTTP 200 response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResult {
    payload: Option<Vec<u8>>,
    status_code: u16,
}

impl FetchResult {
    pub const OK: u16 = 200;

    pub fn ok(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
            status_code: Self::OK,
        }
    }

    pub fn status(status_code: u16) -> Self {
        Self {
            payload: None,
            status_code,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }
}

/// The request never produced a complete response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FetchError {
    pub reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("{:#}", eyre::Report::new(err)))
    }
}

/// A package that could not be mirrored. The `Display` output is the error-log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error(
        "Error downloading crate \"{name}\", version {version} with http code {status_code}. Link: {url}"
    )]
    Status {
        name: String,
        version: String,
        url: Url,
        status_code: u16,
    },

    #[error("Error downloading crate \"{name}\", version {version}: {reason}. Link: {url}")]
    Transport {
        name: String,
        version: String,
        url: Url,
        reason: String,
    },
}

impl DownloadError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            Self::Transport { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackageOutcome {
    /// The archive was already on disk and overwriting is disabled
    Skipped,
    /// The archive was downloaded and written
    Fetched,
    Failed(DownloadError),
}

#[derive(Clone, Debug)]
pub struct MirrorOptions {
    pub registry: RegistryUrl,
    pub output_dir: PathBuf,
    pub overwrite: bool,
    pub exit_on_error: bool,
}

/// Tally of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub fetched: usize,
    pub skipped: usize,
    /// Failures that were logged and tolerated, in lock-file order
    pub failed: Vec<DownloadError>,
}

impl MirrorReport {
    pub fn processed(&self) -> usize {
        self.fetched + self.skipped + self.failed.len()
    }
}
