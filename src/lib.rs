//! ipswitch: DHCP/Static IPv4 Switcher
//!
//! A library for switching Windows network adapters between DHCP and
//! a saved static IPv4 configuration via `netsh`.

pub mod apply;
pub mod cli;
pub mod manager;
pub mod network;
pub mod store;
pub mod ui;
