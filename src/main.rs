use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(flurry::cli::run() as u8)
}
