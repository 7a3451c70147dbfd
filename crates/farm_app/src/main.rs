mod console;

use std::process::ExitCode;

fn main() -> ExitCode {
    match console::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("farm_console: {err}");
            ExitCode::FAILURE
        }
    }
}
