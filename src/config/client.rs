//! Gateway client configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::environment::{Endpoints, Environment};
use super::error::ValidationError;

/// Credentials, environment and transport settings for one merchant client.
///
/// Loadable from the `SEPAY__CLIENT__*` environment variables or built in code
/// with [`ClientConfig::new`] and the `with_*` methods.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Merchant identifier issued by the gateway
    pub merchant_id: String,

    /// Merchant secret key, used for Basic auth and checkout signatures
    secret_key: SecretString,

    /// Target gateway environment
    #[serde(default)]
    pub environment: Environment,

    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Response read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Retries after the first attempt for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds, scaled linearly per attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// REST API base URL override
    pub api_base_url: Option<String>,

    /// Hosted checkout base URL override
    pub checkout_base_url: Option<String>,
}

impl ClientConfig {
    /// Creates a sandbox configuration with default timeouts and retries.
    pub fn new(merchant_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret_key: SecretString::new(secret_key.into()),
            environment: Environment::default(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            api_base_url: None,
            checkout_base_url: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = duration_to_millis(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout_ms = duration_to_millis(timeout);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = duration_to_millis(delay);
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_base_url = Some(url.into());
        self
    }

    /// Exposes the secret key to the signer and auth header builder.
    pub(crate) fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Timeouts and retry settings as a [`RetryPolicy`].
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Endpoint table for the configured environment and overrides.
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::for_environment(self.environment);
        if let Some(url) = &self.api_base_url {
            endpoints = endpoints.with_api_base_url(url.clone());
        }
        if let Some(url) = &self.checkout_base_url {
            endpoints = endpoints.with_checkout_base_url(url.clone());
        }
        endpoints
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("merchant_id"));
        }
        if self.secret_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("secret_key"));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ValidationError::InvalidConnectTimeout);
        }
        if self.read_timeout_ms == 0 {
            return Err(ValidationError::InvalidReadTimeout);
        }
        if let Some(url) = &self.api_base_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidBaseUrl("api_base_url"));
            }
        }
        if let Some(url) = &self.checkout_base_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidBaseUrl("checkout_base_url"));
            }
        }
        Ok(())
    }
}

/// Timeouts and bounded linear backoff for outbound API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Retries after the first attempt; zero means a single attempt
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Wait before the retry that follows `attempt` (zero-based): `retry_delay * (attempt + 1)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt.saturating_add(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(default_connect_timeout_ms()),
            read_timeout: Duration::from_millis(default_read_timeout_ms()),
            max_retries: default_max_retries(),
            retry_delay: Duration::from_millis(default_retry_delay_ms()),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url::Url::parse(url).is_ok() && (url.starts_with("http://") || url.starts_with("https://"))
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_read_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}
