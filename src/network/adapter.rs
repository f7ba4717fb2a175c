//! Core network types for adapter representation.

use std::fmt;
use std::net::Ipv4Addr;

/// A snapshot of a single network adapter at enumeration time.
///
/// Snapshots are never persisted; every listing re-enumerates.
///
/// # Equality
///
/// Two snapshots are equal if they have the same name and addresses.
/// Address order matters for equality comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// The friendly name of the adapter (e.g., "Ethernet", "Wi-Fi").
    /// This is the name `netsh` expects in `name=` arguments.
    pub name: String,
    /// All IPv4 addresses assigned to this adapter.
    pub ipv4_addresses: Vec<Ipv4Addr>,
}

impl Adapter {
    /// Creates a new adapter snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, ipv4_addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            name: name.into(),
            ipv4_addresses,
        }
    }

    /// Returns true if this adapter qualifies for management.
    ///
    /// An adapter qualifies when it carries at least one IPv4 address
    /// outside the link-local 169.254.0.0/16 block. Addresses in that
    /// block are self-assigned (APIPA) and indicate the adapter has no
    /// usable configuration.
    #[must_use]
    pub fn is_manageable(&self) -> bool {
        self.ipv4_addresses.iter().any(|addr| !addr.is_link_local())
    }

    /// Returns the first IPv4 address outside the link-local block, if any.
    #[must_use]
    pub fn routable_ipv4(&self) -> Option<Ipv4Addr> {
        self.ipv4_addresses
            .iter()
            .find(|addr| !addr.is_link_local())
            .copied()
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.routable_ipv4() {
            Some(addr) => write!(f, "{} ({addr})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
