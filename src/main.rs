//! adr - Architecture Decision Record manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = adr_helper::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
