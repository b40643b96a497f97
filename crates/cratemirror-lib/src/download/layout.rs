//! Where a package lives, remotely and in the mirror.
//!
//! The local tree reproduces the registry's download endpoint path, so the
//! output directory can later be served as a registry mirror itself.

use crate::error::CrateMirrorError;
use crate::lockfile::PackageRecord;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use url::Url;

const DOWNLOAD_ENDPOINT_PREFIX: [&str; 3] = ["api", "v1", "crates"];
const DOWNLOAD_ENDPOINT_SUFFIX: &str = "download";

/// Base URL of a crate registry. Always an absolute `http(s)` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryUrl(Url);

impl RegistryUrl {
    pub fn parse(value: &str) -> Result<Self, CrateMirrorError> {
        let url = Url::parse(value).map_err(|e| CrateMirrorError::CliArgumentValidation {
            details: format!("Invalid registry URL {value}: {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(CrateMirrorError::CliArgumentValidation {
                details: format!("Registry URL {value} must be an http:// or https:// URL"),
            });
        }

        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// `{base}/api/v1/crates/{name}/{version}/download`
    pub fn archive_url(&self, package: &PackageRecord) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(DOWNLOAD_ENDPOINT_PREFIX)
                .push(&package.name)
                .push(&package.version)
                .push(DOWNLOAD_ENDPOINT_SUFFIX);
        }
        url
    }
}

impl Display for RegistryUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `{output_dir}/api/v1/crates/{name}/{version}/download`
pub fn archive_path(output_dir: &Path, package: &PackageRecord) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    path.extend(DOWNLOAD_ENDPOINT_PREFIX);
    path.push(&package.name);
    path.push(&package.version);
    path.push(DOWNLOAD_ENDPOINT_SUFFIX);
    path
}
