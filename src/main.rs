//! ipswitch: DHCP/Static IPv4 Switcher
//!
//! Entry point for the ipswitch application.

use std::process::ExitCode;

use ipswitch::cli::Cli;

mod app;
mod run;

use app::{exit_code, print_startup_hint, setup_tracing};
use run::RunError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    setup_tracing(cli.verbose);

    match run::execute(&cli) {
        Ok(()) => exit_code::SUCCESS,
        Err(RunError::Startup(e)) => {
            eprintln!("Startup error: {e}");
            print_startup_hint(&e);
            exit_code::STARTUP_ERROR
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}
