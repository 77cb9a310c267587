//! Client configuration options.

use std::env;
use std::time::Duration;

use reqwest::Method;

use crate::{version, Error, Result};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://chat.stream-io-api.com";

/// Read an environment variable, treating an empty value as unset.
pub(crate) fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Configuration for the Stream Chat client.
///
/// # Example
///
/// ```
/// use stream_chat::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://chat-proxy-dublin.stream-io-api.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent and `X-Stream-Client` header value
    pub user_agent: String,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(6),
            user_agent: version::version_header(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `STREAM_CHAT_URL` and `STREAM_CHAT_TIMEOUT` (seconds). Unset or
    /// empty variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = env_value("STREAM_CHAT_URL") {
            config.base_url = url;
        }

        if let Some(timeout) = env_value("STREAM_CHAT_TIMEOUT") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("STREAM_CHAT_TIMEOUT is not a number: {}", timeout))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// When and how [`HttpTransport`](super::HttpTransport) repeats a failed
/// request.
///
/// Only idempotent methods are repeated, so a mute or ban is never sent
/// twice. Between attempts the transport waits `base_delay * 2^attempt`,
/// capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Wait before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single wait
    pub max_delay: Duration,
    /// Response statuses worth another attempt
    pub retry_on: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            retry_on: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Send every request exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set how many extra attempts are made.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the first wait and the cap on later waits.
    pub fn with_delays(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }

    /// Replace the set of statuses that trigger a retry.
    pub fn with_retry_on(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_on = statuses.into_iter().collect();
        self
    }

    /// Whether a request with this method may be repeated at all.
    pub fn allows_method(&self, method: &Method) -> bool {
        self.max_retries > 0 && method.is_idempotent()
    }

    /// Whether a response with this status is worth another attempt.
    pub fn allows_status(&self, status: u16) -> bool {
        self.retry_on.contains(&status)
    }

    /// The wait before retry number `attempt` (zero based).
    pub fn delay(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}
