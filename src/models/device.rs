//! Push device models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Push notification backend for a device.
///
/// Tags the service adds later are kept verbatim in [`PushProvider::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PushProvider {
    /// Apple Push Notification service
    Apn,
    /// Firebase Cloud Messaging
    Firebase,
    /// A provider this crate does not know about
    Other(String),
}

impl PushProvider {
    /// The wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            PushProvider::Apn => "apn",
            PushProvider::Firebase => "firebase",
            PushProvider::Other(s) => s,
        }
    }
}

impl fmt::Display for PushProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PushProvider {
    fn from(s: String) -> Self {
        match s.as_str() {
            "apn" => PushProvider::Apn,
            "firebase" => PushProvider::Firebase,
            _ => PushProvider::Other(s),
        }
    }
}

impl From<&str> for PushProvider {
    fn from(s: &str) -> Self {
        PushProvider::from(s.to_string())
    }
}

impl From<PushProvider> for String {
    fn from(p: PushProvider) -> Self {
        match p {
            PushProvider::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// A device registered for push notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device ID (the push token)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Push backend
    pub push_provider: PushProvider,
}

impl Device {
    /// Create a device record.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        push_provider: PushProvider,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            push_provider,
        }
    }
}
