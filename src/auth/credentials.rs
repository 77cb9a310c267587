//! API key/secret handling and JWT signing.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{Error, Result};

/// API credentials for a Stream Chat application.
///
/// The secret never leaves this type except as a signing key, and is
/// redacted from `Debug` output.
///
/// # Example
///
/// ```
/// use stream_chat::Credentials;
///
/// let credentials = Credentials::new("api-key", "api-secret");
/// let token = credentials.create_token("jane", None).unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

#[derive(Serialize)]
struct ServerClaims {
    server: bool,
}

#[derive(Serialize)]
struct UserClaims<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

impl Credentials {
    /// Create credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Fail unless both the key and the secret are set.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }
        if self.api_secret.expose_secret().is_empty() {
            return Err(Error::Config("API secret is empty".to_string()));
        }
        Ok(())
    }

    /// The public API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a server-side token (`{"server": true}`).
    pub fn server_token(&self) -> Result<SecretString> {
        let token = self.sign(&ServerClaims { server: true })?;
        Ok(SecretString::from(token))
    }

    /// Sign a token a client app can use to connect as `user_id`.
    ///
    /// Without an expiration the token does not expire.
    pub fn create_token(
        &self,
        user_id: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<String> {
        if user_id.is_empty() {
            return Err(Error::invalid("user ID is empty"));
        }

        self.sign(&UserClaims {
            user_id,
            exp: expiration.map(|e| e.timestamp()),
        })
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String> {
        let key = EncodingKey::from_secret(self.api_secret.expose_secret().as_bytes());
        Ok(encode(&Header::default(), claims, &key)?)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
