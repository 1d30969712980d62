//! `earnings` command line entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use earnings::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_tracing();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
