//! Adapter discovery over an injected fetcher.

use super::{Adapter, AdapterFetcher, FetchError};

/// Discovers adapters through an [`AdapterFetcher`] and applies the
/// manageability rule.
///
/// Every listing re-enumerates, so adapters that appeared or vanished
/// since the last call are reflected without restarting the program.
#[derive(Debug)]
pub struct AdapterRegistry<F> {
    fetcher: F,
}

impl<F: AdapterFetcher> AdapterRegistry<F> {
    /// Creates a registry over the given fetcher.
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Lists manageable adapters in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if enumeration fails.
    pub fn manageable(&self) -> Result<Vec<Adapter>, FetchError> {
        let mut adapters = self.fetcher.fetch()?;
        adapters.retain(Adapter::is_manageable);
        Ok(adapters)
    }

    /// Lists all adapters in enumeration order, whether manageable or not.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if enumeration fails.
    pub fn all(&self) -> Result<Vec<Adapter>, FetchError> {
        self.fetcher.fetch()
    }
}
