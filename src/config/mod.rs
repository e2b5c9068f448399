//! SDK configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SEPAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use sepay::config::SepayConfig;
//!
//! let config = SepayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using the {} gateway", config.client.environment.as_str());
//! ```

mod client;
mod environment;
mod error;
mod webhook;

pub use client::{ClientConfig, RetryPolicy};
pub use environment::{Endpoints, Environment};
pub use error::{ConfigError, ValidationError};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root SDK configuration
///
/// Load using [`SepayConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct SepayConfig {
    /// Merchant credentials and transport settings
    pub client: ClientConfig,

    /// Webhook receiver settings, when this process accepts webhooks
    pub webhook: Option<WebhookConfig>,

    /// Log filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl SepayConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SEPAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SEPAY__CLIENT__MERCHANT_ID=...` -> `client.merchant_id = ...`
    /// - `SEPAY__CLIENT__ENVIRONMENT=production` -> `client.environment = production`
    /// - `SEPAY__WEBHOOK__API_KEY=...` -> `webhook.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SEPAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.client.validate()?;
        if let Some(webhook) = &self.webhook {
            webhook.validate()?;
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
