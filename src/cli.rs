//! CLI argument parsing using clap.
//!
//! Without a subcommand the program starts an interactive session;
//! subcommands run a single operation and exit.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default location of the configuration record, resolved against the
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "ip_config.json";

/// ipswitch: switch a network adapter between DHCP and a static IPv4 setup
#[derive(Debug, Parser)]
#[command(name = "ipswitch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run; omit it for an interactive session
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the configuration record (default: ip_config.json)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Adapter to manage, skipping the startup selection
    #[arg(long, short, global = true)]
    pub adapter: Option<String>,

    /// Log netsh commands without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// One-shot operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Switch the adapter to DHCP
    Dhcp,
    /// Apply the saved static configuration
    Static,
    /// Print the managed adapter and its saved configuration
    Show,
    /// Edit and save the static configuration
    Edit,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// The configuration record path, falling back to the default.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
