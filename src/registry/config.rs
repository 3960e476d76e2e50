//! Client configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;

use super::retry::RetryPolicy;

/// Production endpoint of the Polish VAT white list.
pub const DEFAULT_API_URL: &str = "https://wl-api.mf.gov.pl";

/// Browser-like identity; the registry applies stricter limits to bare clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.121 Safari/537.36";

/// `Accept-Language` header sent with every request.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "pl-PL,pl;q=0.9,en-US;q=0.8,en;q=0.7";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding [`Config::base_url`].
pub const ENV_API_URL: &str = "VATPL_API_URL";
/// Environment variable overriding the retry attempt count.
pub const ENV_RETRY_COUNT: &str = "VATPL_RETRY_COUNT";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "VATPL_TIMEOUT_SECS";

/// Error reading configuration overrides.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Settings for a [`WhiteListClient`](super::WhiteListClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Registry base URL without a trailing slash.
    pub base_url: String,
    /// Retry budget and backoff for the `verify*` methods.
    pub retry: RetryPolicy,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// `Accept-Language` header value.
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.into(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.into(),
        }
    }
}

impl Config {
    /// Defaults with `VATPL_*` environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a numeric override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from any key/value source.
    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self = self.with_base_url(url);
        }
        if let Some(value) = lookup(ENV_RETRY_COUNT) {
            let attempts = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_RETRY_COUNT,
                value: value.clone(),
            })?;
            self.retry.max_attempts = attempts;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_SECS,
                value: value.clone(),
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Point the client at another endpoint, e.g. the test registry.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the number of attempts made by the `verify*` methods.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts;
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
