//! Library identity constants

/// Name of this library.
pub const LIBRARY_NAME: &str = env!("CARGO_PKG_NAME");

/// Version of this library.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of this library, as reported in client identification headers.
pub fn library_version() -> &'static str {
    LIBRARY_VERSION
}
