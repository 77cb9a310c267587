//! # stream-chat
//!
//! An async Rust client for the Stream Chat server-side REST API.
//!
//! The crate shapes and signs requests for user, moderation and device
//! endpoints and decodes the JSON responses into typed models.
//!
//! ## Features
//!
//! - **Moderation**: mute, flag and ban users
//! - **Users**: export, deactivate, reactivate, delete and upsert users
//! - **Devices**: register and remove push devices
//! - **Typed options**: [`options::RequestOption`] factories compiled into
//!   query strings or request bodies
//! - **Pluggable transport**: swap [`HttpTransport`] for any [`Transport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use stream_chat::ChatClient;
//! use stream_chat::options::{compile_map, RequestOption};
//!
//! #[tokio::main]
//! async fn main() -> stream_chat::Result<()> {
//!     let client = ChatClient::from_env()?;
//!
//!     // Mute a user on behalf of another
//!     client.moderation().mute("spammer", "jane").await?;
//!
//!     // Ban for ten minutes
//!     let options = compile_map([
//!         RequestOption::timeout(Duration::from_secs(600)),
//!         RequestOption::ban_reason("flooding"),
//!     ]);
//!     client.moderation().ban("spammer", "admin", Some(options)).await?;
//!
//!     // Export a user
//!     let user = client.users().export("jane", &[]).await?;
//!     println!("{} has {} mutes", user.id, user.mutes.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod options;
pub mod version;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use client::{ChatClient, ClientConfig, HttpTransport, RetryConfig, Transport};
pub use error::{Error, Result};
pub use version::version;

/// Prelude module for convenient imports.
///
/// ```rust
/// use stream_chat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{ChatClient, ClientConfig, RetryConfig, Transport};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Device, Mute, PushProvider, User};
    pub use crate::options::{compile_map, compile_query, OptionValue, QueryValues, RequestOption};
    pub use crate::Credentials;
}
