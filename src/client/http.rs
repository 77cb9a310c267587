//! Default [`Transport`] built on `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use url::Url;

use crate::auth::Credentials;
use crate::options::QueryValues;
use crate::{Error, Result};

use super::config::{ClientConfig, RetryConfig};
use super::transport::Transport;

const STREAM_AUTH_TYPE: &str = "stream-auth-type";
const STREAM_CLIENT: &str = "x-stream-client";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Sends requests to the Stream Chat REST API.
///
/// Every request carries the `api_key` query parameter and a server-side
/// JWT. Transient failures of idempotent requests are retried according to
/// the [`RetryConfig`].
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl HttpTransport {
    /// Create a transport for the given application.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are incomplete, the base URL does
    /// not parse, or the server token cannot be signed.
    pub fn new(credentials: &Credentials, config: &ClientConfig) -> Result<Self> {
        credentials.validate()?;
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(Self::build_headers(credentials, config)?)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key().to_string(),
            retry: config.retry.clone(),
        })
    }

    /// Build the headers sent with every request.
    fn build_headers(credentials: &Credentials, config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let token = credentials.server_token()?;
        let mut auth = HeaderValue::from_str(token.expose_secret())
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        headers.insert(STREAM_AUTH_TYPE, HeaderValue::from_static("jwt"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            STREAM_CLIENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| Error::Config("Invalid user agent".to_string()))?,
        );

        Ok(headers)
    }

    fn url(&self, path: &str, query: &QueryValues) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    fn should_retry(&self, method: &Method, err: &Error) -> bool {
        if !self.retry.allows_method(method) {
            return false;
        }
        match err {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } => self.retry.allows_status(429),
            Error::Api { status, .. } => self.retry.allows_status(*status),
            _ => false,
        }
    }

    async fn send_once(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle an API response.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let status_code = status.as_u16();

        if status_code == 429 {
            let retry_after_secs = retry_after(response.headers(), Utc::now().timestamp());
            return Err(Error::RateLimited { retry_after_secs });
        }

        let body: Value = response.json().await.unwrap_or_default();
        Err(Error::from_api_response(status_code, body))
    }
}

/// Seconds until the rate limit window resets, from the epoch timestamp in
/// `x-ratelimit-reset`. Falls back to a minute when the header is missing or
/// unreadable.
fn retry_after(headers: &HeaderMap, now: i64) -> u64 {
    headers
        .get(RATE_LIMIT_RESET)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|reset| u64::try_from(reset.saturating_sub(now)).unwrap_or(0))
        .unwrap_or(60)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryValues,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path, query)?;
        let mut attempt = 0;

        loop {
            tracing::debug!(%method, path, attempt, "sending request");

            match self.send_once(method.clone(), url.clone(), body).await {
                Ok(value) => return Ok(value),
                Err(err)
                    if attempt < self.retry.max_retries && self.should_retry(&method, &err) =>
                {
                    let backoff: Duration = self.retry.delay(attempt);
                    tracing::warn!(
                        %method,
                        path,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(%method, path, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("retry", &self.retry)
            .finish()
    }
}
