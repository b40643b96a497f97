use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress output shared by the package counter and the per-archive bars.
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub fn multi_progress() -> MultiProgress {
    MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(20))
}

/// Progress output that never draws.
pub fn hidden_multi_progress() -> MultiProgress {
    MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
}

pub fn packages_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix}: {percent:>3}%|{bar:30}| {pos}/{len} [{elapsed_precise}<{eta_precise}]")
        .expect("valid progress template")
        .progress_chars("━━╾─")
}

/// Style for a download whose size was advertised.
pub fn bytes_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix}: {percent:>3}%|{bar:30}| {bytes}/{total_bytes} [{elapsed_precise}<{eta_precise}, {bytes_per_sec}]")
        .expect("valid progress template")
        .progress_chars("━━╾─")
}

/// Style for a download without a content length.
pub fn unbounded_bytes_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner} {prefix}: {bytes} [{elapsed_precise}, {bytes_per_sec}]")
        .expect("valid progress template")
}

pub fn packages_progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len)
        .with_style(packages_progress_style())
        .with_prefix("Crates to download")
}

pub fn archive_progress_bar(label: &str, content_length: Option<u64>) -> ProgressBar {
    let bar = match content_length {
        Some(len) => ProgressBar::new(len).with_style(bytes_progress_style()),
        None => ProgressBar::no_length().with_style(unbounded_bytes_style()),
    };
    bar.with_prefix(label.to_string())
}
