use cbweb_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // File logging when the state dir is writable, stderr otherwise.
    if let Err(err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable: {:#}", err),
            Err(stderr_err) => eprintln!("cbweb: logging disabled: {:#}; {:#}", err, stderr_err),
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("cbweb error: {:#}", err);
        std::process::exit(1);
    }
}
