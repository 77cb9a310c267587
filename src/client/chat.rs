//! The client entry point and the request helpers services share.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{DevicesService, ModerationService, UsersService};
use crate::auth::Credentials;
use crate::options::QueryValues;
use crate::{Error, Result};

use super::config::{env_value, ClientConfig};
use super::http::HttpTransport;
use super::transport::Transport;

/// The main client for the Stream Chat server-side API.
///
/// Endpoint methods are grouped into services reached through
/// [`users`](Self::users), [`moderation`](Self::moderation) and
/// [`devices`](Self::devices). Clones share one transport and can be used
/// from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use stream_chat::ChatClient;
///
/// # async fn example() -> stream_chat::Result<()> {
/// let client = ChatClient::new("api-key", "api-secret")?;
///
/// client.moderation().mute("spammer", "jane").await?;
///
/// let user = client.users().export("jane", &[]).await?;
/// println!("Exported {}", user.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ChatClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
}

impl ChatClient {
    /// Create a client with default configuration.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(Credentials::new(api_key, api_secret), ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&credentials, &config)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                transport: Arc::new(transport),
                credentials: Some(credentials),
            }),
        })
    }

    /// Create a client from environment variables.
    ///
    /// Credentials come from `STREAM_KEY` / `STREAM_SECRET`, falling back to
    /// `STREAM_CHAT_API_KEY` / `STREAM_CHAT_API_SECRET`. See
    /// [`ClientConfig::from_env`] for the remaining variables.
    pub fn from_env() -> Result<Self> {
        let api_key = env_any(&["STREAM_KEY", "STREAM_CHAT_API_KEY"])?;
        let api_secret = env_any(&["STREAM_SECRET", "STREAM_CHAT_API_SECRET"])?;
        Self::with_config(Credentials::new(api_key, api_secret), ClientConfig::from_env()?)
    }

    /// Create a client over a custom transport.
    ///
    /// Clients built this way cannot sign user tokens.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                credentials: None,
            }),
        }
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the moderation service.
    pub fn moderation(&self) -> ModerationService {
        ModerationService::new(self.inner.clone())
    }

    /// Get the devices service.
    pub fn devices(&self) -> DevicesService {
        DevicesService::new(self.inner.clone())
    }

    /// Sign a token a client app can use to connect as `user_id`.
    pub fn create_token(
        &self,
        user_id: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<String> {
        match &self.inner.credentials {
            Some(credentials) => credentials.create_token(user_id, expiration),
            None => Err(Error::Config(
                "client was built without credentials".to_string(),
            )),
        }
    }
}

fn env_any(names: &[&str]) -> Result<String> {
    names
        .iter()
        .find_map(|name| env_value(name))
        .ok_or_else(|| Error::Config(format!("none of {} is set", names.join(", "))))
}

impl ClientInner {
    /// Issue a request and decode the response body.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &QueryValues,
        body: Option<&Value>,
    ) -> Result<T> {
        let value = self.transport.request(method, path, query, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Issue a request and discard the response body.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &QueryValues,
        body: Option<&Value>,
    ) -> Result<()> {
        self.transport.request(method, path, query, body).await?;
        Ok(())
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryValues,
    ) -> Result<T> {
        self.request(Method::GET, path, query, None).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, &QueryValues::new(), Some(&body))
            .await
    }

    /// Make a POST request whose response is not needed.
    pub(crate) async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &QueryValues::new(), Some(&body))
            .await
    }

    /// Make a DELETE request whose response is not needed.
    pub(crate) async fn delete_empty(&self, path: &str, query: &QueryValues) -> Result<()> {
        self.send(Method::DELETE, path, query, None).await
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}
