//! `netsh` command construction and the applier built on it.

use std::fmt;

use crate::store::StaticConfig;

use super::{ApplyError, ApplyOutcome, CommandOutput, CommandRunner, NetworkApplier};

/// A fully-formed `netsh` invocation.
///
/// Building a command performs no I/O; the [`CommandRunner`] it is
/// handed to decides whether anything actually executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetshCommand {
    args: Vec<String>,
}

impl NetshCommand {
    const PROGRAM: &'static str = "netsh";

    /// Switches the adapter's IPv4 address to DHCP.
    #[must_use]
    pub fn set_address_dhcp(adapter: &str) -> Self {
        Self {
            args: vec![
                "interface".into(),
                "ip".into(),
                "set".into(),
                "address".into(),
                format!("name={adapter}"),
                "source=dhcp".into(),
            ],
        }
    }

    /// Switches the adapter's DNS to DHCP.
    #[must_use]
    pub fn set_dns_dhcp(adapter: &str) -> Self {
        Self {
            args: vec![
                "interface".into(),
                "ip".into(),
                "set".into(),
                "dns".into(),
                format!("name={adapter}"),
                "source=dhcp".into(),
            ],
        }
    }

    /// Assigns a static IPv4 address, mask and gateway to the adapter.
    #[must_use]
    pub fn set_address_static(adapter: &str, config: &StaticConfig) -> Self {
        Self {
            args: vec![
                "interface".into(),
                "ip".into(),
                "set".into(),
                "address".into(),
                format!("name={adapter}"),
                "static".into(),
                config.static_ip.clone(),
                config.subnet_mask.clone(),
                config.gateway.clone(),
            ],
        }
    }

    /// Assigns a static DNS server to the adapter.
    #[must_use]
    pub fn set_dns_static(adapter: &str, config: &StaticConfig) -> Self {
        Self {
            args: vec![
                "interface".into(),
                "ip".into(),
                "set".into(),
                "dns".into(),
                format!("name={adapter}"),
                "static".into(),
                config.dns.clone(),
            ],
        }
    }

    /// The program to invoke.
    #[must_use]
    pub const fn program(&self) -> &'static str {
        Self::PROGRAM
    }

    /// The arguments, in order, without the program name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for NetshCommand {
    /// Renders the command line for logs and error messages.
    ///
    /// Arguments containing whitespace are quoted for readability only;
    /// execution passes them as-is without any shell in between.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::PROGRAM)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// [`NetworkApplier`] implementation driving `netsh` through a runner.
#[derive(Debug)]
pub struct NetshApplier<R> {
    runner: R,
}

impl<R: CommandRunner> NetshApplier<R> {
    /// Creates an applier over the given runner.
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    fn run_step(&self, command: NetshCommand) -> Result<(), ApplyError> {
        tracing::debug!("Running {command}");
        let output = self.runner.run(&command).map_err(ApplyError::Spawn)?;

        if output.is_success() {
            return Ok(());
        }

        Err(ApplyError::Failed {
            command: command.to_string(),
            code: output.code,
            output: failure_text(&output),
        })
    }
}

fn failure_text(output: &CommandOutput) -> String {
    let text = output.combined_text();
    if text.is_empty() {
        "(no output)".to_string()
    } else {
        text
    }
}

impl<R: CommandRunner> NetworkApplier for NetshApplier<R> {
    fn apply_dhcp(&self, adapter: &str) -> ApplyOutcome {
        let address = self.run_step(NetshCommand::set_address_dhcp(adapter));
        let dns = self.run_step(NetshCommand::set_dns_dhcp(adapter));
        ApplyOutcome { address, dns }
    }

    fn apply_static(&self, adapter: &str, config: &StaticConfig) -> ApplyOutcome {
        let address = self.run_step(NetshCommand::set_address_static(adapter, config));
        let dns = self.run_step(NetshCommand::set_dns_static(adapter, config));
        ApplyOutcome { address, dns }
    }
}
