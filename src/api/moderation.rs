//! Moderation service: mutes, flags and bans.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::client::ClientInner;
use crate::options::{QueryValues, KEY_TARGET_USER_ID, KEY_USER_ID};
use crate::{Error, Result};

use super::require;

/// Service for moderation operations.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use stream_chat::options::{compile_map, RequestOption};
///
/// # async fn example(client: stream_chat::ChatClient) -> stream_chat::Result<()> {
/// // Mute a user on behalf of another
/// client.moderation().mute("spammer", "jane").await?;
///
/// // Ban for an hour with a reason
/// let options = compile_map([
///     RequestOption::timeout(Duration::from_secs(3600)),
///     RequestOption::ban_reason("spam"),
/// ]);
/// client.moderation().ban("spammer", "admin", Some(options)).await?;
/// # Ok(())
/// # }
/// ```
pub struct ModerationService {
    inner: Arc<ClientInner>,
}

impl ModerationService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Mute `target_id` for `user_id`.
    pub async fn mute(&self, target_id: &str, user_id: &str) -> Result<()> {
        require(target_id, "target ID")?;
        require(user_id, "user ID")?;

        let body = json!({
            "target_id": target_id,
            "user_id": user_id,
        });
        self.inner.post_empty("moderation/mute", &body).await
    }

    /// Mute several targets for `user_id` in one request.
    pub async fn mute_many(&self, target_ids: &[&str], user_id: &str) -> Result<()> {
        require_all(target_ids)?;
        require(user_id, "user ID")?;

        let body = json!({
            "target_ids": target_ids,
            "user_id": user_id,
        });
        self.inner.post_empty("moderation/mute", &body).await
    }

    /// Remove the mute `user_id` placed on `target_id`.
    pub async fn unmute(&self, target_id: &str, user_id: &str) -> Result<()> {
        require(target_id, "target ID")?;
        require(user_id, "user ID")?;

        let body = json!({
            "target_id": target_id,
            "user_id": user_id,
        });
        self.inner.post_empty("moderation/unmute", &body).await
    }

    /// Remove mutes on several targets in one request.
    ///
    /// The targets travel as repeated `target_ids` query parameters.
    pub async fn unmute_many(&self, target_ids: &[&str], user_id: &str) -> Result<()> {
        require_all(target_ids)?;
        require(user_id, "user ID")?;

        let mut query: QueryValues = target_ids.iter().map(|id| ("target_ids", *id)).collect();
        query.set(KEY_USER_ID, user_id);

        self.inner
            .send(Method::POST, "moderation/unmute", &query, None)
            .await
    }

    /// Flag a user for review.
    ///
    /// `options` must carry at least one field (for example `user_id` of the
    /// reporter); `target_user_id` is always set from `target_id`.
    pub async fn flag(&self, target_id: &str, mut options: Map<String, Value>) -> Result<()> {
        require(target_id, "target ID")?;
        if options.is_empty() {
            return Err(Error::invalid("flag user: options must be not empty"));
        }

        options.insert(KEY_TARGET_USER_ID.to_string(), target_id.into());
        self.inner.post_empty("moderation/flag", &options).await
    }

    /// Remove a flag from a user.
    pub async fn unflag(&self, target_id: &str, options: Option<Map<String, Value>>) -> Result<()> {
        require(target_id, "target ID")?;

        let mut options = options.unwrap_or_default();
        options.insert(KEY_TARGET_USER_ID.to_string(), target_id.into());
        self.inner.post_empty("moderation/unflag", &options).await
    }

    /// Ban `target_id`, acting as `user_id`.
    ///
    /// `options` may hold any JSON values, e.g. `timeout` and `reason`.
    /// `target_user_id` and `user_id` always win over keys in `options`.
    pub async fn ban(
        &self,
        target_id: &str,
        user_id: &str,
        options: Option<Map<String, Value>>,
    ) -> Result<()> {
        require(target_id, "target ID")?;
        require(user_id, "user ID")?;

        let mut options = options.unwrap_or_default();
        options.insert(KEY_TARGET_USER_ID.to_string(), target_id.into());
        options.insert(KEY_USER_ID.to_string(), user_id.into());
        self.inner.post_empty("moderation/ban", &options).await
    }

    /// Lift a ban.
    ///
    /// Unlike [`ban`](Self::ban), options are query parameters and therefore
    /// plain strings.
    pub async fn unban(
        &self,
        target_id: &str,
        options: Option<HashMap<String, String>>,
    ) -> Result<()> {
        require(target_id, "target ID")?;

        let mut query: QueryValues = options.unwrap_or_default().into_iter().collect();
        query.set(KEY_TARGET_USER_ID, target_id);

        self.inner.delete_empty("moderation/ban", &query).await
    }
}

fn require_all(target_ids: &[&str]) -> Result<()> {
    if target_ids.is_empty() {
        tracing::debug!("rejecting request: target IDs are empty");
        return Err(Error::invalid("target IDs are empty"));
    }
    target_ids.iter().try_for_each(|id| require(id, "target ID"))
}
