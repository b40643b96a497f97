mod fetcher;
mod layout;
mod mirror;
mod types;

pub use fetcher::{ArchiveFetcher, HttpArchiveFetcher};
pub use layout::{RegistryUrl, archive_path};
pub use mirror::{mirror_package, mirror_packages};
pub use types::{
    DownloadError, FetchError, FetchResult, MirrorOptions, MirrorReport, PackageOutcome,
};
