//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use ipswitch::manager::StartupError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Startup error (exit code 1) - no usable adapter, unreadable config record, etc.
    pub const STARTUP_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - a netsh step failed, a save failed, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common startup errors.
pub fn print_startup_hint(error: &StartupError) {
    match error {
        StartupError::AdapterNotFound { .. } => {
            eprintln!("\nRun 'ipswitch' without --adapter to pick an adapter interactively.");
        }
        StartupError::NoAdapterFound => {
            eprintln!("\nOnly adapters holding a routable IPv4 address can be managed.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
