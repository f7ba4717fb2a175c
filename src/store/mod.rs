//! Persistence for the static IPv4 configuration record.
//!
//! This module provides abstractions for loading and saving the single
//! configuration record the program keeps between runs.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileConfigStore;

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The static IPv4 configuration applied when leaving DHCP.
///
/// Values are kept as the user entered them and handed to `netsh`
/// verbatim; syntactically invalid addresses surface as apply failures
/// rather than being rejected up front.
///
/// On disk the record uses upper-case keys (`STATIC_IP`, `SUBNET_MASK`,
/// `GATEWAY`, `DNS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StaticConfig {
    /// Address assigned to the adapter (e.g., "192.168.1.50").
    pub static_ip: String,
    /// Subnet mask (e.g., "255.255.255.0").
    pub subnet_mask: String,
    /// Default gateway address.
    pub gateway: String,
    /// DNS server address.
    pub dns: String,
}

impl StaticConfig {
    /// Creates a new configuration record.
    #[must_use]
    pub fn new(
        static_ip: impl Into<String>,
        subnet_mask: impl Into<String>,
        gateway: impl Into<String>,
        dns: impl Into<String>,
    ) -> Self {
        Self {
            static_ip: static_ip.into(),
            subnet_mask: subnet_mask.into(),
            gateway: gateway.into(),
            dns: dns.into(),
        }
    }
}

/// Errors that can occur during configuration persistence.
///
/// A file that exists but cannot be parsed is always an error here,
/// never silently treated as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the file that could not be read.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but does not parse as a record.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the malformed file.
        path: std::path::PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the configuration file.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// Path of the file that could not be written.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to serialize the configuration record to JSON.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Abstraction for persisting the configuration record between runs.
///
/// # Testing
///
/// Use [`mock::MockConfigStore`] in tests to avoid filesystem dependencies.
pub trait ConfigStore {
    /// Loads the saved configuration record.
    ///
    /// Returns `Ok(None)` when no record has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] when the file exists but cannot be
    /// read, and [`StoreError::Parse`] when its content is not a valid
    /// record.
    fn load(&self) -> Result<Option<StaticConfig>, StoreError>;

    /// Saves the record, replacing any previous one.
    ///
    /// Implementations should use atomic write semantics (write to temp
    /// file, then rename) so a crash mid-write never leaves a truncated
    /// record behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn save(&self, config: &StaticConfig) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn load(&self) -> Result<Option<StaticConfig>, StoreError> {
        (**self).load()
    }

    fn save(&self, config: &StaticConfig) -> Result<(), StoreError> {
        (**self).save(config)
    }
}
