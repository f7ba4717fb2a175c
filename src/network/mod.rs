//! Network layer for discovering and representing adapters.
//!
//! This module provides types and traits for:
//! - Representing network adapters ([`Adapter`])
//! - Enumerating adapters ([`AdapterFetcher`])
//! - Applying the manageability rule ([`AdapterRegistry`])
//! - Platform-specific implementations ([`platform`])

mod adapter;
mod fetcher;
pub mod platform;
mod registry;

pub use adapter::Adapter;
pub use fetcher::{AdapterFetcher, FetchError};
pub use registry::AdapterRegistry;

#[cfg(test)]
pub use fetcher::mock;
