//! Gateway environments and their endpoint table

use serde::{Deserialize, Serialize};

const SANDBOX_API_URL: &str = "https://pgapi-sandbox.sepay.vn";
const SANDBOX_CHECKOUT_URL: &str = "https://pay-sandbox.sepay.vn";
const PRODUCTION_API_URL: &str = "https://pgapi.sepay.vn";
const PRODUCTION_CHECKOUT_URL: &str = "https://pay.sepay.vn";

const CHECKOUT_INIT_PATH: &str = "/v1/checkout/init";
const ORDER_DETAIL_PATH: &str = "/v1/order/detail";
const ORDER_LIST_PATH: &str = "/v1/order";
const ORDER_VOID_PATH: &str = "/v1/order/voidTransaction";
const ORDER_CANCEL_PATH: &str = "/v1/order/cancel";

/// Gateway environment
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Name used in the signed `env` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    /// Check if this is the production gateway
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// REST API base URL
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        }
    }

    /// Hosted checkout base URL
    pub fn checkout_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_CHECKOUT_URL,
            Environment::Production => PRODUCTION_CHECKOUT_URL,
        }
    }
}

/// Resolved endpoint URLs for one client.
///
/// Base URLs default to the environment's and can be overridden, e.g. to point
/// at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    checkout_base: String,
}

impl Endpoints {
    /// Endpoints of a gateway environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            api_base: environment.api_base_url().to_string(),
            checkout_base: environment.checkout_base_url().to_string(),
        }
    }

    /// Overrides the REST API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = trim_trailing_slash(url.into());
        self
    }

    /// Overrides the hosted checkout base URL
    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_base = trim_trailing_slash(url.into());
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base
    }

    pub fn checkout_base_url(&self) -> &str {
        &self.checkout_base
    }

    /// Form action URL for hosted checkout
    pub fn checkout_init(&self) -> String {
        format!("{}{}", self.checkout_base, CHECKOUT_INIT_PATH)
    }

    /// Order detail URL with the id encoded as a single path segment
    pub fn order_detail(&self, order_id: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(order_id.as_bytes()).collect();
        format!("{}{}/{}", self.api_base, ORDER_DETAIL_PATH, encoded)
    }

    pub fn order_list(&self) -> String {
        format!("{}{}", self.api_base, ORDER_LIST_PATH)
    }

    pub fn order_void(&self) -> String {
        format!("{}{}", self.api_base, ORDER_VOID_PATH)
    }

    pub fn order_cancel(&self) -> String {
        format!("{}{}", self.api_base, ORDER_CANCEL_PATH)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
