//! Library version strings.

/// The library version, e.g. `v0.1.0`.
pub fn version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

/// Value of the `X-Stream-Client` header sent with every request.
pub fn version_header() -> String {
    format!("stream-rust-client-{}", env!("CARGO_PKG_VERSION"))
}
