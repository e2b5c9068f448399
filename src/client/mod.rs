//! Client facade over checkout and order resources.
//!
//! ```no_run
//! use sepay::client::SepayClient;
//! use sepay::config::ClientConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SepayClient::new(ClientConfig::new("MERCHANT_001", "spsk_test_secret"))?;
//!
//! let request = client
//!     .new_checkout()
//!     .purchase(100_000, "INV-001", "Order INV-001")
//!     .build()?;
//! let html = client.checkout().build_auto_submit_form(&request, None);
//!
//! let order = client.orders().retrieve("ORD-1").await?;
//! # let _ = (html, order);
//! # Ok(())
//! # }
//! ```

mod checkout;
mod orders;

pub use checkout::{CheckoutFormData, CheckoutResource, DEFAULT_FORM_ID, DEFAULT_SUBMIT_LABEL};
pub use orders::OrderResource;

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ReqwestTransport};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::checkout::CheckoutBuilder;
use crate::ports::HttpTransport;

/// Entry point bundling configuration, signer and API client.
#[derive(Debug, Clone)]
pub struct SepayClient {
    config: ClientConfig,
    checkout: CheckoutResource,
    orders: OrderResource,
}

impl SepayClient {
    /// Validates `config` and connects through reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.retry_policy().connect_timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Validates `config` and sends requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let endpoints = config.endpoints();
        let checkout = CheckoutResource::from_endpoints(endpoints.clone())
            .with_secret_key(config.secret_key())?;
        let orders = OrderResource::new(ApiClient::from_config(&config, transport), endpoints);

        tracing::debug!(
            merchant_id = %config.merchant_id,
            environment = config.environment.as_str(),
            "SePay client initialised"
        );

        Ok(Self {
            config,
            checkout,
            orders,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn checkout(&self) -> &CheckoutResource {
        &self.checkout
    }

    pub fn orders(&self) -> &OrderResource {
        &self.orders
    }

    /// A checkout builder preset with this client's merchant, secret and environment.
    pub fn new_checkout(&self) -> CheckoutBuilder {
        CheckoutBuilder::new(self.config.merchant_id.clone(), self.config.secret_key())
            .environment(self.config.environment)
    }
}
