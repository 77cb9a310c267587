//! API service modules for Stream Chat endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the API. Every method rejects empty identifiers locally,
//! before anything is sent.

mod devices;
mod moderation;
mod users;

pub use devices::DevicesService;
pub use moderation::ModerationService;
pub use users::UsersService;

use crate::{Error, Result};

/// Fail with a local validation error if `value` is empty.
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        tracing::debug!("rejecting request: {} is empty", what);
        return Err(Error::invalid(format!("{} is empty", what)));
    }
    Ok(())
}

/// `users/{id}` or `users/{id}/{action}` with the ID escaped as one segment.
pub(crate) fn user_path(id: &str, action: Option<&str>) -> String {
    let id = urlencoding::encode(id);
    match action {
        Some(action) => format!("users/{}/{}", id, action),
        None => format!("users/{}", id),
    }
}
