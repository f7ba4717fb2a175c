//! Applying adapter configuration through `netsh`.
//!
//! This module provides types and traits for:
//! - Building `netsh interface ip` command lines ([`NetshCommand`])
//! - Running external commands ([`CommandRunner`], [`SystemRunner`], [`DryRunRunner`])
//! - Driving DHCP/static transitions ([`NetworkApplier`], [`NetshApplier`])

mod netsh;
mod runner;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use netsh::{NetshApplier, NetshCommand};
pub use runner::{CommandOutput, CommandRunner, DryRunRunner, SystemRunner};

use std::fmt;
use std::io;

use thiserror::Error;

use crate::store::StaticConfig;

/// Error type for a single `netsh` step.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The `netsh` process could not be started at all.
    #[error("Failed to run netsh: {0}")]
    Spawn(#[source] io::Error),

    /// `netsh` ran but reported failure.
    #[error("Command `{command}` failed ({}): {output}", describe_exit(.code))]
    Failed {
        /// The command line that failed.
        command: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured output explaining the failure.
        output: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    (*code).map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}

/// The two `netsh` steps of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    /// The IPv4 address step.
    Address,
    /// The DNS step.
    Dns,
}

impl fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Dns => write!(f, "DNS"),
        }
    }
}

/// Result of one DHCP/static transition.
///
/// The address and DNS steps run independently: a failure in the first
/// does not stop the second, so the outcome carries one result per step
/// instead of short-circuiting.
#[derive(Debug)]
pub struct ApplyOutcome {
    /// Result of the address step.
    pub address: Result<(), ApplyError>,
    /// Result of the DNS step.
    pub dns: Result<(), ApplyError>,
}

impl ApplyOutcome {
    /// An outcome with both steps succeeded.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            address: Ok(()),
            dns: Ok(()),
        }
    }

    /// Returns true if both steps succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.address.is_ok() && self.dns.is_ok()
    }

    /// Iterates over failed steps with their errors.
    pub fn step_errors(&self) -> impl Iterator<Item = (ApplyStep, &ApplyError)> {
        let address = self.address.as_ref().err().map(|e| (ApplyStep::Address, e));
        let dns = self.dns.as_ref().err().map(|e| (ApplyStep::Dns, e));
        address.into_iter().chain(dns)
    }
}

/// Trait for switching an adapter between DHCP and a static configuration.
///
/// Implementations perform both `netsh` steps (address, then DNS) and
/// report per-step results; they never retry and never roll back.
pub trait NetworkApplier {
    /// Switches the adapter's address and DNS to DHCP.
    fn apply_dhcp(&self, adapter: &str) -> ApplyOutcome;

    /// Applies the given static configuration to the adapter.
    fn apply_static(&self, adapter: &str, config: &StaticConfig) -> ApplyOutcome;
}

impl<A: NetworkApplier + ?Sized> NetworkApplier for &A {
    fn apply_dhcp(&self, adapter: &str) -> ApplyOutcome {
        (**self).apply_dhcp(adapter)
    }

    fn apply_static(&self, adapter: &str, config: &StaticConfig) -> ApplyOutcome {
        (**self).apply_static(adapter, config)
    }
}
