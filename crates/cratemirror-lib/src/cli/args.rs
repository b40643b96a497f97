use clap::{ArgAction, Parser};
use tracing::Level;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorCommand {
    pub lockfile_path: String,
    pub config_path: Option<String>,
    pub overwrite: bool,
    pub repo: Option<String>,
    pub output_dir: Option<String>,
    pub exit_on_error: bool,
    pub err_log: Option<String>,
}

pub struct Args {
    pub command: MirrorCommand,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "cratemirror",
    version,
    about = "Mirror the crates pinned by a Cargo.lock from a crate registry for use behind an air gap"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(value_name = "CARGO_LOCK", help = "Path to a Cargo.lock")]
    cargo_lock_file: String,

    #[arg(short = 'o', long = "overwrite", help = "Overwrite existing crates")]
    overwrite: bool,

    #[arg(
        short = 'r',
        long = "repo",
        value_name = "URL",
        help = "Crates repository link [default: https://crates.io]"
    )]
    repo: Option<String>,

    #[arg(
        short = 'O',
        long = "output",
        value_name = "DIR",
        help = "Output directory [default: ./]"
    )]
    output: Option<String>,

    #[arg(
        short = 'e',
        long = "exit-on-error",
        help = "Exit if a download error is encountered"
    )]
    exit_on_error: bool,

    #[arg(
        short = 'l',
        long = "err-log",
        value_name = "FILE",
        help = "Write the error log to a file. If not specified, stderr is used instead"
    )]
    err_log: Option<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file with defaults for repo, output, overwrite, exit_on_error and err_log"
    )]
    config: Option<String>,
}

impl Cli {
    fn into_args(self) -> Args {
        let log_level = match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };

        let command = MirrorCommand {
            lockfile_path: self.cargo_lock_file,
            config_path: self.config,
            overwrite: self.overwrite,
            repo: self.repo,
            output_dir: self.output,
            exit_on_error: self.exit_on_error,
            err_log: self.err_log,
        };

        Args { command, log_level }
    }
}

pub fn parse_args() -> Args {
    let args = Cli::parse().into_args();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(args.log_level.into())
                .from_env_lossy()
                .add_directive("reqwest=warn".parse().expect("valid directive"))
                .add_directive("hyper_util=warn".parse().expect("valid directive")),
        )
        .init();

    args
}
