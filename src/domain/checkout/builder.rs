//! Checkout request builder and validation.

use secrecy::{ExposeSecret, SecretString};

use crate::config::Environment;
use crate::domain::foundation::ValidationError;
use crate::domain::signing::Signer;

use super::operation::{Operation, PaymentMethod};
use super::request::{Agreement, CheckoutRequest};

/// Maximum length of an invoice number.
pub const MAX_INVOICE_LENGTH: usize = 100;

/// Collects checkout fields, validates them and signs the result.
///
/// # Example
///
/// ```
/// use sepay::domain::checkout::CheckoutBuilder;
///
/// let request = CheckoutBuilder::new("MERCHANT_001", "secret")
///     .purchase(100_000, "INV-1", "Order #1")
///     .success_url("https://shop.example/success")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.currency(), "VND");
/// assert!(!request.signature().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutBuilder {
    merchant: String,
    secret_key: SecretString,
    environment: Environment,
    operation: Option<Operation>,
    payment_method: Option<PaymentMethod>,
    order_amount: u64,
    order_invoice_number: Option<String>,
    order_description: Option<String>,
    customer_id: Option<String>,
    agreement: Agreement,
    success_url: Option<String>,
    error_url: Option<String>,
    cancel_url: Option<String>,
}

impl CheckoutBuilder {
    /// Starts a sandbox checkout for the given merchant credentials.
    pub fn new(merchant: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            merchant: merchant.into(),
            secret_key: SecretString::new(secret_key.into()),
            environment: Environment::default(),
            operation: None,
            payment_method: None,
            order_amount: 0,
            order_invoice_number: None,
            order_description: None,
            customer_id: None,
            agreement: Agreement::default(),
            success_url: None,
            error_url: None,
            cancel_url: None,
        }
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Amount in VND; must be positive for PURCHASE and zero for VERIFY.
    pub fn order_amount(mut self, amount: u64) -> Self {
        self.order_amount = amount;
        self
    }

    pub fn order_invoice_number(mut self, invoice: impl Into<String>) -> Self {
        self.order_invoice_number = Some(invoice.into());
        self
    }

    pub fn order_description(mut self, description: impl Into<String>) -> Self {
        self.order_description = Some(description.into());
        self
    }

    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn error_url(mut self, url: impl Into<String>) -> Self {
        self.error_url = Some(url.into());
        self
    }

    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn agreement_id(mut self, id: impl Into<String>) -> Self {
        self.agreement.id = Some(id.into());
        self
    }

    pub fn agreement_name(mut self, name: impl Into<String>) -> Self {
        self.agreement.name = Some(name.into());
        self
    }

    pub fn agreement_type(mut self, agreement_type: impl Into<String>) -> Self {
        self.agreement.agreement_type = Some(agreement_type.into());
        self
    }

    pub fn agreement_payment_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.agreement.payment_frequency = Some(frequency.into());
        self
    }

    pub fn agreement_amount_per_payment(mut self, amount: impl Into<String>) -> Self {
        self.agreement.amount_per_payment = Some(amount.into());
        self
    }

    /// Shorthand for a PURCHASE of `amount` with invoice and description.
    pub fn purchase(
        self,
        amount: u64,
        invoice: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.operation(Operation::Purchase)
            .order_amount(amount)
            .order_invoice_number(invoice)
            .order_description(description)
    }

    /// Shorthand for a zero-amount card VERIFY.
    pub fn verify(self, description: impl Into<String>) -> Self {
        self.operation(Operation::Verify)
            .order_amount(0)
            .order_description(description)
    }

    /// Validates the collected fields and returns the signed request.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, checking in order: merchant,
    /// secret key, operation, description, operation rules, redirect URLs.
    pub fn build(self) -> Result<CheckoutRequest, ValidationError> {
        let operation = self.validate()?;

        let signer = Signer::new(self.secret_key.expose_secret())
            .map_err(|_| ValidationError::empty_field("secret_key"))?;

        let mut request = CheckoutRequest {
            merchant: self.merchant,
            env: self.environment.as_str().to_string(),
            operation,
            payment_method: self.payment_method,
            order_amount: self.order_amount,
            order_invoice_number: self.order_invoice_number,
            order_description: self.order_description.unwrap_or_default(),
            customer_id: self.customer_id,
            agreement: self.agreement,
            success_url: self.success_url,
            error_url: self.error_url,
            cancel_url: self.cancel_url,
            signature: String::new(),
        };
        request.signature = signer.sign(&request.signature_fields());

        tracing::debug!(
            operation = %request.operation,
            invoice = request.order_invoice_number.as_deref().unwrap_or(""),
            "Built signed checkout request"
        );

        Ok(request)
    }

    fn validate(&self) -> Result<Operation, ValidationError> {
        if self.merchant.is_empty() {
            return Err(ValidationError::empty_field("merchant"));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(ValidationError::empty_field("secret_key"));
        }

        let operation = self
            .operation
            .ok_or_else(|| ValidationError::empty_field("operation"))?;

        if self.order_description.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::empty_field("order_description"));
        }

        match operation {
            Operation::Purchase => {
                if self.order_amount == 0 {
                    return Err(ValidationError::invalid_amount("PURCHASE", "amount > 0"));
                }
                validate_invoice_number(self.order_invoice_number.as_deref())?;
            }
            Operation::Verify => {
                if self.order_amount != 0 {
                    return Err(ValidationError::invalid_amount("VERIFY", "amount = 0"));
                }
            }
        }

        validate_redirect_url("success_url", self.success_url.as_deref())?;
        validate_redirect_url("error_url", self.error_url.as_deref())?;
        validate_redirect_url("cancel_url", self.cancel_url.as_deref())?;

        Ok(operation)
    }
}

fn validate_invoice_number(invoice: Option<&str>) -> Result<(), ValidationError> {
    let invoice = match invoice {
        Some(i) if !i.trim().is_empty() => i,
        _ => return Err(ValidationError::empty_field("order_invoice_number")),
    };

    let length = invoice.chars().count();
    if length > MAX_INVOICE_LENGTH {
        return Err(ValidationError::too_long(
            "order_invoice_number",
            MAX_INVOICE_LENGTH,
            length,
        ));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if !invoice.chars().all(allowed) {
        return Err(ValidationError::invalid_format(
            "order_invoice_number",
            "must be alphanumeric (hyphens and underscores allowed)",
        ));
    }

    Ok(())
}

/// Accepts a URL only if it parses and uses an explicit http(s) scheme prefix.
fn validate_redirect_url(field: &'static str, url: Option<&str>) -> Result<(), ValidationError> {
    let Some(url) = url else {
        return Ok(());
    };

    let parses = url::Url::parse(url).is_ok();
    let http_prefix = url.starts_with("http://") || url.starts_with("https://");

    if parses && http_prefix {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(
            field,
            "must be an absolute http:// or https:// URL",
        ))
    }
}
