use avf_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch. Per-item download failures are not errors here.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("avf error: {:#}", err);
        std::process::exit(1);
    }
}
