use super::fetcher::ArchiveFetcher;
use super::layout::archive_path;
use super::types::{DownloadError, MirrorOptions, MirrorReport, PackageOutcome};
use crate::error::CrateMirrorError;
use crate::error_log::ErrorLog;
use crate::lockfile::PackageRecord;
use crate::progress::packages_progress_bar;
use eyre::WrapErr;
use indicatif::{MultiProgress, ProgressBar};
use std::path::Path;

/// Mirrors every package in order, one at a time.
///
/// Failed downloads are written to `error_log`. They are collected into the
/// report unless `exit_on_error` is set, in which case the first one ends the
/// run. Failing to store a downloaded archive always ends the run.
pub async fn mirror_packages<F: ArchiveFetcher>(
    packages: &[PackageRecord],
    options: &MirrorOptions,
    fetcher: &F,
    error_log: &mut ErrorLog,
    progress: &MultiProgress,
) -> Result<MirrorReport, CrateMirrorError> {
    let packages_bar = progress.add(packages_progress_bar(packages.len() as u64));
    let result = mirror_all(
        packages,
        options,
        fetcher,
        error_log,
        progress,
        &packages_bar,
    )
    .await;
    packages_bar.finish_and_clear();
    result
}

async fn mirror_all<F: ArchiveFetcher>(
    packages: &[PackageRecord],
    options: &MirrorOptions,
    fetcher: &F,
    error_log: &mut ErrorLog,
    progress: &MultiProgress,
    packages_bar: &ProgressBar,
) -> Result<MirrorReport, CrateMirrorError> {
    let mut report = MirrorReport::default();

    for package in packages {
        match mirror_package(package, options, fetcher).await? {
            PackageOutcome::Skipped => report.skipped += 1,
            PackageOutcome::Fetched => report.fetched += 1,
            PackageOutcome::Failed(err) => {
                tracing::debug!(
                    name = %package.name,
                    version = %package.version,
                    "Download failed: {}",
                    err
                );
                progress
                    .suspend(|| error_log.record(&err))
                    .map_err(CrateMirrorError::ErrorLogWrite)?;

                if options.exit_on_error {
                    return Err(err.into());
                }
                report.failed.push(err);
            }
        }
        packages_bar.inc(1);
    }

    Ok(report)
}

/// Skips, downloads or fails a single package.
pub async fn mirror_package<F: ArchiveFetcher>(
    package: &PackageRecord,
    options: &MirrorOptions,
    fetcher: &F,
) -> Result<PackageOutcome, CrateMirrorError> {
    let local_path = archive_path(&options.output_dir, package);

    if !options.overwrite && local_path.exists() {
        tracing::debug!(
            name = %package.name,
            version = %package.version,
            output = %local_path.display(),
            "Archive already present, skipping"
        );
        return Ok(PackageOutcome::Skipped);
    }

    let url = options.registry.archive_url(package);
    let label = format!("Downloading {}:{}", package.name, package.version);
    tracing::debug!(
        name = %package.name,
        version = %package.version,
        url = %url,
        output = %local_path.display(),
        "Downloading"
    );

    let result = match fetcher.fetch(&url, &label).await {
        Ok(result) => result,
        Err(err) => {
            return Ok(PackageOutcome::Failed(DownloadError::Transport {
                name: package.name.clone(),
                version: package.version.clone(),
                url,
                reason: err.reason,
            }));
        }
    };

    let status_code = result.status_code();
    let Some(payload) = result.into_payload() else {
        return Ok(PackageOutcome::Failed(DownloadError::Status {
            name: package.name.clone(),
            version: package.version.clone(),
            url,
            status_code,
        }));
    };

    write_archive(&local_path, &payload)
        .await
        .map_err(CrateMirrorError::ArchiveStore)?;
    tracing::debug!(
        name = %package.name,
        version = %package.version,
        output = %local_path.display(),
        bytes = payload.len(),
        "Stored"
    );

    Ok(PackageOutcome::Fetched)
}

async fn write_archive(path: &Path, payload: &[u8]) -> eyre::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .wrap_err_with(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, payload)
        .await
        .wrap_err_with(|| format!("Failed to write archive: {}", path.display()))?;
    Ok(())
}
