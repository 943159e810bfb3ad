//! Untask - remove task comments from source files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = untask::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
