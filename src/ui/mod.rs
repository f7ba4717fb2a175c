//! Presentation boundary for the interactive session.
//!
//! All user-facing prompting and messaging goes through the
//! [`Interaction`] trait so the orchestration logic stays free of
//! stdin/stdout details and fully testable. Diagnostic output uses
//! `tracing` and is a separate channel from everything here.

mod console;

pub use console::ConsoleUi;

use std::io;

use crate::store::StaticConfig;

/// Subnet mask offered when no previous value exists.
pub const DEFAULT_SUBNET_MASK: &str = "255.255.255.0";

/// DNS server offered when no previous value exists.
pub const DEFAULT_DNS: &str = "8.8.8.8";

/// Trait for interacting with the user.
///
/// # Testing
///
/// Use [`mock::ScriptedInteraction`] in tests to script replies and
/// capture everything shown.
pub trait Interaction {
    /// Prompts for one line of input.
    ///
    /// Implementations return `default` when the user submits an empty
    /// reply and a default was provided.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    fn prompt_line(&mut self, label: &str, default: Option<&str>) -> io::Result<String>;

    /// Presents a list of options and returns the chosen index.
    ///
    /// Returns `Ok(None)` when the user cancels instead of choosing.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>>;

    /// Shows an informational message.
    fn info(&mut self, message: &str);

    /// Shows an error message.
    fn error(&mut self, message: &str);

    /// Renders the managed adapter and its saved configuration.
    fn show_status(&mut self, adapter: &str, config: &StaticConfig);
}

/// Prompts for all four fields of a static configuration.
///
/// When `current` is given its values pre-fill the prompts, so editing
/// keeps any field the user leaves empty. On a first run only the mask
/// and DNS have defaults ([`DEFAULT_SUBNET_MASK`], [`DEFAULT_DNS`]).
///
/// Values are not validated here; `netsh` is the judge of what is an
/// acceptable address.
///
/// # Errors
///
/// Returns an error if reading input fails.
pub fn prompt_static_config(
    ui: &mut dyn Interaction,
    current: Option<&StaticConfig>,
) -> io::Result<StaticConfig> {
    let defaults = current.map_or_else(
        || StaticConfig::new("", DEFAULT_SUBNET_MASK, "", DEFAULT_DNS),
        Clone::clone,
    );

    let static_ip = ui.prompt_line("Static IP", non_empty(&defaults.static_ip))?;
    let subnet_mask = ui.prompt_line("Subnet mask", non_empty(&defaults.subnet_mask))?;
    let gateway = ui.prompt_line("Gateway", non_empty(&defaults.gateway))?;
    let dns = ui.prompt_line("DNS server", non_empty(&defaults.dns))?;

    Ok(StaticConfig::new(static_ip, subnet_mask, gateway, dns))
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
