//! Hosted checkout: form action URL, form fields and HTML rendering.

use crate::config::{ConfigError, Endpoints, Environment, ValidationError};
use crate::domain::checkout::CheckoutRequest;
use crate::domain::signing::{FieldValues, Signer};

pub const DEFAULT_FORM_ID: &str = "sepay-checkout-form";
pub const DEFAULT_SUBMIT_LABEL: &str = "Pay Now";

/// Action URL and ordered hidden fields of a checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFormData {
    pub action_url: String,
    /// The 17 signable fields followed by `signature`.
    pub fields: Vec<(&'static str, String)>,
}

/// Renders signed checkout requests and verifies checkout callbacks.
#[derive(Debug, Clone)]
pub struct CheckoutResource {
    endpoints: Endpoints,
    signer: Option<Signer>,
}

impl CheckoutResource {
    pub fn new(environment: Environment) -> Self {
        Self::from_endpoints(Endpoints::for_environment(environment))
    }

    pub fn from_endpoints(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            signer: None,
        }
    }

    /// Enables callback verification with the merchant secret key.
    pub fn with_secret_key(self, secret_key: &str) -> Result<Self, ConfigError> {
        Ok(self.with_signer(Signer::new(secret_key)?))
    }

    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints = self.endpoints.with_checkout_base_url(url);
        self
    }

    /// Form action URL.
    pub fn checkout_url(&self) -> String {
        self.endpoints.checkout_init()
    }

    pub fn generate_form(&self, request: &CheckoutRequest) -> CheckoutFormData {
        CheckoutFormData {
            action_url: self.checkout_url(),
            fields: request.form_fields(),
        }
    }

    /// A POST form of hidden inputs with a submit button.
    pub fn build_html_form(&self, request: &CheckoutRequest, submit_label: Option<&str>) -> String {
        let form = self.generate_form(request);
        let label = submit_label.unwrap_or(DEFAULT_SUBMIT_LABEL);

        let mut html = format!(
            "<form action=\"{}\" method=\"POST\">\n",
            escape_html(&form.action_url)
        );
        push_hidden_inputs(&mut html, &form.fields);
        html.push_str(&format!(
            "  <button type=\"submit\">{}</button>\n</form>",
            escape_html(label)
        ));
        html
    }

    /// A POST form that submits itself on page load.
    ///
    /// A missing or empty `form_id` falls back to [`DEFAULT_FORM_ID`].
    pub fn build_auto_submit_form(&self, request: &CheckoutRequest, form_id: Option<&str>) -> String {
        let form = self.generate_form(request);
        let id = form_id.filter(|id| !id.is_empty()).unwrap_or(DEFAULT_FORM_ID);
        let id = escape_html(id);

        let mut html = format!(
            "<form id=\"{}\" action=\"{}\" method=\"POST\">\n",
            id,
            escape_html(&form.action_url)
        );
        push_hidden_inputs(&mut html, &form.fields);
        html.push_str("</form>\n");
        html.push_str(&format!(
            "<script>document.getElementById(\"{}\").submit();</script>",
            id
        ));
        html
    }

    /// Checks a callback signature over `fields`.
    ///
    /// # Errors
    ///
    /// `ConfigError::ValidationFailed` when no secret key was configured.
    pub fn verify_signature(
        &self,
        fields: &FieldValues,
        candidate: Option<&str>,
    ) -> Result<bool, ConfigError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ValidationError::MissingRequired("secret_key"))?;
        Ok(signer.verify(fields, candidate))
    }
}

fn push_hidden_inputs(html: &mut String, fields: &[(&'static str, String)]) {
    for (name, value) in fields {
        html.push_str(&format!(
            "  <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            escape_html(name),
            escape_html(value)
        ));
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CheckoutBuilder;

    const SECRET: &str = "spsk_test_secret";

    fn request(description: &str) -> CheckoutRequest {
        CheckoutBuilder::new("MERCHANT_001", SECRET)
            .purchase(100_000, "INV-001", description)
            .success_url("https://shop.example/success")
            .build()
            .unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // URL and Form Data Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn checkout_url_follows_environment() {
        assert_eq!(
            CheckoutResource::new(Environment::Sandbox).checkout_url(),
            "https://pay-sandbox.sepay.vn/v1/checkout/init"
        );
        assert_eq!(
            CheckoutResource::new(Environment::Production).checkout_url(),
            "https://pay.sepay.vn/v1/checkout/init"
        );
    }

    #[test]
    fn custom_base_url_overrides_environment() {
        let resource = CheckoutResource::new(Environment::Production)
            .with_checkout_base_url("https://pay.local/");

        assert_eq!(resource.checkout_url(), "https://pay.local/v1/checkout/init");
    }

    #[test]
    fn form_data_ends_with_signature() {
        let req = request("Order 1");
        let form = CheckoutResource::new(Environment::Sandbox).generate_form(&req);

        assert_eq!(form.fields.len(), 18);
        assert_eq!(form.fields[0].0, "merchant");
        let (name, value) = form.fields.last().unwrap();
        assert_eq!(*name, "signature");
        assert_eq!(value, req.signature());
    }

    // ══════════════════════════════════════════════════════════════
    // HTML Rendering Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn html_form_has_hidden_inputs_and_default_label() {
        let html = CheckoutResource::new(Environment::Sandbox).build_html_form(&request("Order 1"), None);

        assert!(html.starts_with(
            "<form action=\"https://pay-sandbox.sepay.vn/v1/checkout/init\" method=\"POST\">"
        ));
        assert!(html.contains("<input type=\"hidden\" name=\"merchant\" value=\"MERCHANT_001\">"));
        assert!(html.contains("<input type=\"hidden\" name=\"order_amount\" value=\"100000\">"));
        assert!(html.contains("name=\"signature\""));
        assert!(html.contains("<button type=\"submit\">Pay Now</button>"));
    }

    #[test]
    fn html_form_escapes_values() {
        let html = CheckoutResource::new(Environment::Sandbox)
            .build_html_form(&request("<b>\"Tom & Jerry's\"</b>"), Some("Pay <now>"));

        assert!(html.contains("value=\"&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;\""));
        assert!(html.contains("Pay &lt;now&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn auto_submit_form_uses_form_id() {
        let resource = CheckoutResource::new(Environment::Sandbox);

        let default = resource.build_auto_submit_form(&request("Order 1"), None);
        assert!(default.contains("<form id=\"sepay-checkout-form\""));
        assert!(default.contains("document.getElementById(\"sepay-checkout-form\").submit();"));

        let custom = resource.build_auto_submit_form(&request("Order 1"), Some("pay"));
        assert!(custom.contains("<form id=\"pay\""));
        assert!(custom.contains("getElementById(\"pay\")"));
    }

    #[test]
    fn auto_submit_form_with_empty_id_uses_default() {
        let html = CheckoutResource::new(Environment::Sandbox)
            .build_auto_submit_form(&request("Order 1"), Some(""));

        assert!(html.contains("<form id=\"sepay-checkout-form\""));
        assert!(html.ends_with(
            "<script>document.getElementById(\"sepay-checkout-form\").submit();</script>"
        ));
    }

    #[test]
    fn escape_html_handles_all_special_chars() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    // ══════════════════════════════════════════════════════════════
    // Callback Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_signature_accepts_own_signature() {
        let req = request("Order 1");
        let resource = CheckoutResource::new(Environment::Sandbox)
            .with_secret_key(SECRET)
            .unwrap();

        let verified = resource
            .verify_signature(&req.signature_fields(), Some(req.signature()))
            .unwrap();

        assert!(verified);
    }

    #[test]
    fn verify_signature_rejects_tampered_fields() {
        let req = request("Order 1");
        let mut fields = req.signature_fields();
        fields.insert("order_amount".to_string(), "1".to_string());
        let resource = CheckoutResource::new(Environment::Sandbox)
            .with_secret_key(SECRET)
            .unwrap();

        assert!(!resource.verify_signature(&fields, Some(req.signature())).unwrap());
        assert!(!resource.verify_signature(&req.signature_fields(), None).unwrap());
    }

    #[test]
    fn verify_signature_without_secret_is_config_error() {
        let req = request("Order 1");
        let resource = CheckoutResource::new(Environment::Sandbox);

        let err = resource
            .verify_signature(&req.signature_fields(), Some(req.signature()))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::ValidationFailed(ValidationError::MissingRequired("secret_key"))
        ));
    }

    #[test]
    fn empty_secret_key_is_rejected() {
        assert!(CheckoutResource::new(Environment::Sandbox)
            .with_secret_key("")
            .is_err());
    }
}
