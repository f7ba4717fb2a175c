//! Platform-specific adapter fetcher implementations.
//!
//! # Platform Support
//!
//! - **Windows**: Uses the `GetAdaptersAddresses` API via the `windows` crate.
//! - **Other platforms**: [`UnsupportedFetcher`] fails every fetch at runtime.
//!   Management itself is `netsh`-based and therefore Windows-only, but the
//!   stub keeps the platform-free parts of the crate building and testing
//!   everywhere.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::WindowsFetcher;

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub use unsupported::UnsupportedFetcher;

// Re-export the current platform's fetcher as PlatformFetcher for convenience
#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;

#[cfg(not(windows))]
pub use unsupported::UnsupportedFetcher as PlatformFetcher;
