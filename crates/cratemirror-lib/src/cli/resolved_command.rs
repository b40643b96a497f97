use crate::cli::args::MirrorCommand;
use crate::cli::params::MirrorParams;
use crate::config::{MirrorConfig, load_config};
use crate::download::{MirrorOptions, RegistryUrl};
use crate::error::CrateMirrorError;
use crate::lockfile::Lockfile;
use std::path::PathBuf;

pub const DEFAULT_REGISTRY: &str = "https://crates.io";
pub const DEFAULT_OUTPUT_DIR: &str = "./";

/// Merges command-line options over the config file and loads the lock file.
///
/// Command-line values win over config file values, which win over the defaults.
pub fn resolve_command(command: MirrorCommand) -> Result<MirrorParams, CrateMirrorError> {
    let MirrorCommand {
        lockfile_path,
        config_path,
        overwrite,
        repo,
        output_dir,
        exit_on_error,
        err_log,
    } = command;

    let app_config = match config_path {
        Some(config_path) => {
            tracing::info!("Loading configuration from {}", config_path);
            load_config(&config_path)?
        }
        None => MirrorConfig::default(),
    };

    let registry = RegistryUrl::parse(
        repo.as_deref()
            .or(app_config.repo.as_deref())
            .unwrap_or(DEFAULT_REGISTRY),
    )?;

    let output_dir = output_dir
        .map(PathBuf::from)
        .or(app_config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let err_log_path = err_log.map(PathBuf::from).or(app_config.err_log);

    tracing::info!("Loading lockfile from {}", lockfile_path);
    let lockfile_path = PathBuf::from(lockfile_path);
    let lockfile = Lockfile::load_from_file(&lockfile_path)?;

    Ok(MirrorParams {
        lockfile,
        lockfile_path,
        options: MirrorOptions {
            registry,
            output_dir,
            overwrite: overwrite || app_config.overwrite.unwrap_or(false),
            exit_on_error: exit_on_error || app_config.exit_on_error.unwrap_or(false),
        },
        err_log_path,
    })
}
