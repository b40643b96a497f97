use color_eyre::eyre::Report;
use cratemirror_lib::cli::{parse_args, resolve_command, run_mirror};
use std::process::ExitCode;

/// Status for any fatal failure; shells observe it as -1 truncated to 255.
const FAILURE_EXIT_CODE: u8 = 255;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("{err:?}");
        return ExitCode::from(FAILURE_EXIT_CODE);
    }

    let args = parse_args();
    let result = match resolve_command(args.command) {
        Ok(params) => run_mirror(params).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", Report::new(err));
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}
