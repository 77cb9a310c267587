//! Authentication for the Stream Chat server-side API.
//!
//! Server-side calls are authorized with a JWT signed by the application's
//! API secret. The same secret signs user tokens that client apps use to
//! connect.
//!
//! ```
//! use stream_chat::Credentials;
//!
//! # fn example() -> stream_chat::Result<()> {
//! let credentials = Credentials::new("api-key", "api-secret");
//! let user_token = credentials.create_token("jane", None)?;
//! # Ok(())
//! # }
//! ```

mod credentials;

pub use credentials::Credentials;
