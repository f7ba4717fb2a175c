//! Command execution seam for `netsh` invocations.

use std::io;
use std::process::Command;

use super::NetshCommand;

/// Captured result of a finished command.
///
/// `std::process::Output` carries a platform `ExitStatus` that tests
/// cannot construct, so runners return this reduced form instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// Creates an output with the given exit code and no captured text.
    #[must_use]
    pub const fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Returns true if the command exited with code 0.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Returns stdout and stderr joined and trimmed.
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
            .trim()
            .to_string()
    }
}

/// Trait for running a built [`NetshCommand`] to completion.
///
/// The production implementation spawns the real process; tests and
/// `--dry-run` substitute runners that never touch the system.
pub trait CommandRunner {
    /// Runs the command and captures its output.
    ///
    /// A non-zero exit is not an error at this level; it is reported
    /// through [`CommandOutput`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be started at all.
    fn run(&self, command: &NetshCommand) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &NetshCommand) -> io::Result<CommandOutput> {
        (**self).run(command)
    }
}

impl CommandRunner for Box<dyn CommandRunner> {
    fn run(&self, command: &NetshCommand) -> io::Result<CommandOutput> {
        self.as_ref().run(command)
    }
}

/// Runs commands through [`std::process::Command`], blocking until exit.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    _private: (),
}

impl SystemRunner {
    /// Creates a new system runner.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &NetshCommand) -> io::Result<CommandOutput> {
        let output = Command::new(command.program())
            .args(command.args())
            .output()?;

        // netsh output is not guaranteed to be UTF-8; decode lossily
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Logs commands without executing them.
///
/// Every run reports success with no captured output.
#[derive(Debug, Clone, Default)]
pub struct DryRunRunner {
    _private: (),
}

impl DryRunRunner {
    /// Creates a new dry-run runner.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &NetshCommand) -> io::Result<CommandOutput> {
        tracing::info!("Dry-run: {command}");
        Ok(CommandOutput::with_code(0))
    }
}
