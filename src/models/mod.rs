//! Data models for the Stream Chat API.
//!
//! - [`user`] - Users and mutes
//! - [`device`] - Push devices and providers

pub mod device;
pub mod user;

// Re-export commonly used types
pub use device::*;
pub use user::{Mute, User};
pub(crate) use user::UserRequest;
