use std::env;
use std::process::ExitCode;

use greenwave::cli;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    ExitCode::from(cli::run_with_args(&args) as u8)
}
