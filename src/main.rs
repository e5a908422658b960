use std::process::ExitCode;

use clap::Parser;
use transkit::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    let verbose = args.verbose();

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = transkit::mcp::run_server() {
            eprintln!("Error: {:#}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match transkit::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            if verbose {
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitStatus::Error.into()
        }
    }
}
