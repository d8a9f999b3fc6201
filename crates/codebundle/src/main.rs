use std::process::ExitCode;

use clap::Parser;

use codebundle::infra::argfile;
use codebundle::ui::cli::{Cli, exit_status, run};

fn main() -> ExitCode {
    let args = match std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| argfile::expand_args(std::env::args_os(), &cwd))
    {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse_from(args);
    codebundle::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}
