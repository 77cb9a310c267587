//! Users service: export, (de)activation, deletion and updates.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ClientInner;
use crate::models::{User, UserRequest};
use crate::options::{compile_query, RequestOption};
use crate::{Error, Result};

use super::{require, user_path};

/// Service for user operations.
///
/// # Example
///
/// ```no_run
/// use stream_chat::models::User;
/// use stream_chat::options::RequestOption;
///
/// # async fn example(client: stream_chat::ChatClient) -> stream_chat::Result<()> {
/// let mut user = User::new("jane");
/// user.name = Some("Jane Doe".to_string());
/// let updated = client.users().update(&user).await?;
///
/// client
///     .users()
///     .delete("jane", &[RequestOption::hard_delete(), RequestOption::mark_messages_deleted()])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

#[derive(Serialize)]
struct UsersRequest<'a> {
    users: HashMap<&'a str, UserRequest<'a>>,
}

#[derive(Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: HashMap<String, User>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Export everything the service stores about a user.
    pub async fn export(&self, target_id: &str, options: &[RequestOption]) -> Result<User> {
        require(target_id, "target ID")?;

        let query = compile_query(options.iter().cloned());
        self.inner
            .get(&user_path(target_id, Some("export")), &query)
            .await
    }

    /// Deactivate a user. Deactivated users cannot connect.
    pub async fn deactivate(
        &self,
        target_id: &str,
        options: Option<Map<String, Value>>,
    ) -> Result<()> {
        require(target_id, "target ID")?;

        self.inner
            .post_empty(
                &user_path(target_id, Some("deactivate")),
                &options.unwrap_or_default(),
            )
            .await
    }

    /// Reactivate a previously deactivated user.
    pub async fn reactivate(
        &self,
        target_id: &str,
        options: Option<Map<String, Value>>,
    ) -> Result<()> {
        require(target_id, "target ID")?;

        self.inner
            .post_empty(
                &user_path(target_id, Some("reactivate")),
                &options.unwrap_or_default(),
            )
            .await
    }

    /// Delete a user.
    ///
    /// Pass [`RequestOption::hard_delete`] and
    /// [`RequestOption::mark_messages_deleted`] to control what is removed.
    pub async fn delete(&self, target_id: &str, options: &[RequestOption]) -> Result<()> {
        require(target_id, "target ID")?;

        let query = compile_query(options.iter().cloned());
        self.inner
            .delete_empty(&user_path(target_id, None), &query)
            .await
    }

    /// Create or update a single user and return the stored version.
    pub async fn update(&self, user: &User) -> Result<User> {
        let mut users = self.update_many(std::slice::from_ref(user)).await?;
        users
            .remove(&user.id)
            .ok_or_else(|| Error::NotFound(format!("user {} missing from response", user.id)))
    }

    /// Create or update users in one request, keyed by ID in the response.
    pub async fn update_many(&self, users: &[User]) -> Result<HashMap<String, User>> {
        if users.is_empty() {
            return Err(Error::invalid("users are not set"));
        }
        for user in users {
            require(&user.id, "user ID")?;
        }

        let request = UsersRequest {
            users: users
                .iter()
                .map(|u| (u.id.as_str(), UserRequest::from(u)))
                .collect(),
        };

        let response: UsersResponse = self.inner.post("users", &request).await?;
        Ok(response.users)
    }
}
