//! Webhook receiver configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Settings for authenticating and interpreting inbound webhooks
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Expected token of the `Authorization: Apikey <token>` header
    api_key: SecretString,

    /// Prefix of payment identifiers embedded in transfer content (e.g. `DH`)
    pub pattern_prefix: Option<String>,
}

impl WebhookConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            pattern_prefix: None,
        }
    }

    pub fn with_pattern_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.pattern_prefix = Some(prefix.into());
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("webhook.api_key"));
        }
        if matches!(&self.pattern_prefix, Some(p) if p.is_empty()) {
            return Err(ValidationError::MissingRequired("webhook.pattern_prefix"));
        }
        Ok(())
    }
}
