//! Typed optional request parameters.
//!
//! A [`RequestOption`] is a key bound to a typed value. Options are built by
//! the named factories below, then rendered by [`compile_query`] or
//! [`compile_map`] into the form a request needs.
//!
//! ```
//! use std::time::Duration;
//! use stream_chat::options::{compile_query, RequestOption};
//!
//! let query = compile_query([
//!     RequestOption::timeout(Duration::from_secs(60)),
//!     RequestOption::ban_reason("spam"),
//! ]);
//! assert_eq!(query.get("timeout"), Some("60"));
//! assert_eq!(query.get("reason"), Some("spam"));
//! ```

mod compile;

pub use compile::{compile_map, compile_query, QueryValues};

use std::fmt;
use std::time::Duration;

pub(crate) const KEY_TYPE: &str = "type";
pub(crate) const KEY_ID: &str = "id";
pub(crate) const KEY_USER_ID: &str = "user_id";
pub(crate) const KEY_TARGET_USER_ID: &str = "target_user_id";
const KEY_TIMEOUT: &str = "timeout";
const KEY_URL: &str = "url";
const KEY_REASON: &str = "reason";
const KEY_HARD_DELETE: &str = "hard_delete";
const KEY_MARK_MESSAGES_DELETED: &str = "mark_messages_deleted";

/// The value carried by a [`RequestOption`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// Rendered verbatim.
    String(String),
    /// Rendered in decimal.
    Int(i64),
    /// Rendered as `true` / `false`.
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) => f.write_str(s),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Int(i)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

/// An optional value that can be sent with an API call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestOption {
    /// An option produced by one of the named factories.
    Named {
        /// Fixed parameter name
        key: &'static str,
        /// Typed value
        value: OptionValue,
    },
    /// A parameter the library does not wrap yet.
    Raw {
        /// Parameter name
        key: String,
        /// Parameter value, sent verbatim
        value: String,
    },
}

impl RequestOption {
    fn named(key: &'static str, value: impl Into<OptionValue>) -> Self {
        RequestOption::Named {
            key,
            value: value.into(),
        }
    }

    /// Build an option for a parameter that has no named factory.
    ///
    /// ```
    /// use stream_chat::options::{compile_query, RequestOption};
    ///
    /// let query = compile_query([RequestOption::raw("include_deactivated_users", "true")]);
    /// assert_eq!(query.get("include_deactivated_users"), Some("true"));
    /// ```
    pub fn raw(key: impl Into<String>, value: impl Into<String>) -> Self {
        RequestOption::Raw {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The parameter name.
    pub fn key(&self) -> &str {
        match self {
            RequestOption::Named { key, .. } => *key,
            RequestOption::Raw { key, .. } => key.as_str(),
        }
    }

    /// The parameter value.
    pub fn value(&self) -> OptionValue {
        match self {
            RequestOption::Named { value, .. } => value.clone(),
            RequestOption::Raw { value, .. } => OptionValue::String(value.clone()),
        }
    }

    /// The value as it appears on the wire.
    pub fn render(&self) -> String {
        match self {
            RequestOption::Named { value, .. } => value.to_string(),
            RequestOption::Raw { value, .. } => value.clone(),
        }
    }

    /// Timeout for a ban or mute, sent in whole seconds.
    ///
    /// Durations under one second are raised to one second. Anything else
    /// is truncated, so 2.5s is sent as `2`.
    pub fn timeout(duration: Duration) -> Self {
        let secs = duration.max(Duration::from_secs(1)).as_secs();
        Self::named(KEY_TIMEOUT, i64::try_from(secs).unwrap_or(i64::MAX))
    }

    /// Free-text reason for banning a user.
    pub fn ban_reason(reason: impl Into<String>) -> Self {
        Self::named(KEY_REASON, reason.into())
    }

    /// Location parameter (`url`).
    pub fn url(location: impl Into<String>) -> Self {
        Self::named(KEY_URL, location.into())
    }

    /// The acting user.
    pub fn user_id(user_id: impl Into<String>) -> Self {
        Self::named(KEY_USER_ID, user_id.into())
    }

    /// The user being acted upon.
    pub fn target_user_id(target_id: impl Into<String>) -> Self {
        Self::named(KEY_TARGET_USER_ID, target_id.into())
    }

    /// Generic `id` parameter.
    pub fn id(id: impl Into<String>) -> Self {
        Self::named(KEY_ID, id.into())
    }

    /// Generic `type` parameter.
    pub fn kind(kind: impl Into<String>) -> Self {
        Self::named(KEY_TYPE, kind.into())
    }

    /// Ask for a hard delete instead of the default soft delete.
    pub fn hard_delete() -> Self {
        Self::named(KEY_HARD_DELETE, true)
    }

    /// Mark every message the user sent as deleted along with the user.
    pub fn mark_messages_deleted() -> Self {
        Self::named(KEY_MARK_MESSAGES_DELETED, true)
    }

    /// Paginate: ids strictly greater than `id`.
    pub fn greater_than(id: i64) -> Self {
        Self::named("id_gt", id)
    }

    /// Paginate: ids greater than or equal to `id`.
    pub fn greater_or_equal(id: i64) -> Self {
        Self::named("id_gte", id)
    }

    /// Paginate: ids strictly less than `id`.
    pub fn less_than(id: i64) -> Self {
        Self::named("id_lt", id)
    }

    /// Paginate: ids less than or equal to `id`.
    pub fn less_or_equal(id: i64) -> Self {
        Self::named("id_lte", id)
    }

    /// Paginate: skip this many results.
    pub fn offset(offset: i64) -> Self {
        Self::named("offset", offset)
    }

    /// Paginate: return at most this many results.
    pub fn limit(limit: i64) -> Self {
        Self::named("limit", limit)
    }
}
