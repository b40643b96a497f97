use crate::cli::MirrorParams;
use crate::download::{HttpArchiveFetcher, MirrorReport, mirror_packages};
use crate::error::CrateMirrorError;
use crate::error_log::ErrorLog;
use crate::progress::multi_progress;

pub async fn run_mirror(params: MirrorParams) -> Result<MirrorReport, CrateMirrorError> {
    let MirrorParams {
        lockfile,
        lockfile_path,
        options,
        err_log_path,
    } = params;

    let mut error_log = ErrorLog::open(err_log_path.as_deref())?;
    let progress = multi_progress();
    let fetcher = HttpArchiveFetcher::new(progress.clone())?;

    tracing::info!(
        "Mirroring {} packages from {} into {}",
        lockfile.packages.len(),
        options.registry,
        options.output_dir.display()
    );

    let report = mirror_packages(
        &lockfile.packages,
        &options,
        &fetcher,
        &mut error_log,
        &progress,
    )
    .await?;

    if report.failed.is_empty() {
        tracing::info!(
            "Mirrored {}: {} downloaded, {} already present",
            lockfile_path.display(),
            report.fetched,
            report.skipped
        );
    } else {
        tracing::warn!(
            "Mirrored {}: {} downloaded, {} already present, {} failed",
            lockfile_path.display(),
            report.fetched,
            report.skipped,
            report.failed.len()
        );
    }

    Ok(report)
}
