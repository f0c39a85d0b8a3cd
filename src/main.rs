//! Binary entrypoint for the `gitprep` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Credentials may be supplied through a local .env during development.
    dotenvy::dotenv().ok();

    match gitprep::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
