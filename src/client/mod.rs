//! Client entry point, configuration and transport.
//!
//! [`ChatClient`] shapes requests; a [`Transport`] executes them. The
//! default transport is [`HttpTransport`].
//!
//! # Example
//!
//! ```no_run
//! use stream_chat::{ChatClient, ClientConfig, Credentials};
//! use std::time::Duration;
//!
//! # fn example() -> stream_chat::Result<()> {
//! let client = ChatClient::with_config(
//!     Credentials::new("api-key", "api-secret"),
//!     ClientConfig::default().with_timeout(Duration::from_secs(10)),
//! )?;
//! # Ok(())
//! # }
//! ```

mod chat;
mod config;
mod http;
mod transport;

pub use chat::ChatClient;
pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};
pub use http::HttpTransport;
pub use transport::Transport;
pub(crate) use chat::ClientInner;

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
