//! Adapter enumeration trait and error types.

use super::Adapter;
use thiserror::Error;

/// Error type for adapter enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating the system's network adapters.
///
/// Platform-specific implementations live in [`super::platform`]; tests
/// inject mocks instead of touching the real adapter tables.
pub trait AdapterFetcher {
    /// Fetches the current state of all network adapters.
    ///
    /// Implementations return ALL adapters; the manageability rule is
    /// applied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform API call fails or the
    /// platform does not support enumeration.
    fn fetch(&self) -> Result<Vec<Adapter>, FetchError>;
}

impl<F: AdapterFetcher + ?Sized> AdapterFetcher for &F {
    fn fetch(&self) -> Result<Vec<Adapter>, FetchError> {
        (**self).fetch()
    }
}
