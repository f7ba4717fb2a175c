//! Stub fetcher for platforms without adapter enumeration support.

use crate::network::{Adapter, AdapterFetcher, FetchError};

/// Fallback [`AdapterFetcher`] for non-Windows platforms.
///
/// Every fetch fails with a platform error. The rest of the crate stays
/// buildable and testable on any platform; only real adapter discovery
/// is Windows-bound.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedFetcher {
    _private: (),
}

impl UnsupportedFetcher {
    /// Creates a new stub fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AdapterFetcher for UnsupportedFetcher {
    fn fetch(&self) -> Result<Vec<Adapter>, FetchError> {
        Err(FetchError::Platform {
            message: "adapter enumeration is only supported on Windows".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_reports_platform_error() {
        let error = UnsupportedFetcher::new().fetch().unwrap_err();

        assert!(matches!(error, FetchError::Platform { .. }));
        assert!(error.to_string().contains("only supported on Windows"));
    }
}
