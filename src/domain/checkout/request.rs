//! Immutable, signed checkout request.

use crate::domain::signing::{FieldValues, SignatureField};

use super::operation::{Operation, PaymentMethod};

/// Currency of every checkout request.
pub const CURRENCY: &str = "VND";

/// A validated checkout request together with its signature.
///
/// Only [`CheckoutBuilder`](super::CheckoutBuilder) creates values of this type,
/// so the signature always covers exactly the fields held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub(super) merchant: String,
    pub(super) env: String,
    pub(super) operation: Operation,
    pub(super) payment_method: Option<PaymentMethod>,
    pub(super) order_amount: u64,
    pub(super) order_invoice_number: Option<String>,
    pub(super) order_description: String,
    pub(super) customer_id: Option<String>,
    pub(super) agreement: Agreement,
    pub(super) success_url: Option<String>,
    pub(super) error_url: Option<String>,
    pub(super) cancel_url: Option<String>,
    pub(super) signature: String,
}

/// Recurring-payment agreement fields, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agreement {
    pub id: Option<String>,
    pub name: Option<String>,
    pub agreement_type: Option<String>,
    pub payment_frequency: Option<String>,
    pub amount_per_payment: Option<String>,
}

impl CheckoutRequest {
    /// Value of one signed field as it appears on the wire.
    pub fn field_value(&self, field: SignatureField) -> String {
        let value = match field {
            SignatureField::Merchant => Some(self.merchant.as_str()),
            SignatureField::Env => Some(self.env.as_str()),
            SignatureField::Operation => Some(self.operation.as_str()),
            SignatureField::PaymentMethod => self.payment_method.as_ref().map(|m| m.as_str()),
            SignatureField::OrderAmount => return self.order_amount.to_string(),
            SignatureField::Currency => Some(CURRENCY),
            SignatureField::OrderInvoiceNumber => self.order_invoice_number.as_deref(),
            SignatureField::OrderDescription => Some(self.order_description.as_str()),
            SignatureField::CustomerId => self.customer_id.as_deref(),
            SignatureField::AgreementId => self.agreement.id.as_deref(),
            SignatureField::AgreementName => self.agreement.name.as_deref(),
            SignatureField::AgreementType => self.agreement.agreement_type.as_deref(),
            SignatureField::AgreementPaymentFrequency => {
                self.agreement.payment_frequency.as_deref()
            }
            SignatureField::AgreementAmountPerPayment => {
                self.agreement.amount_per_payment.as_deref()
            }
            SignatureField::SuccessUrl => self.success_url.as_deref(),
            SignatureField::ErrorUrl => self.error_url.as_deref(),
            SignatureField::CancelUrl => self.cancel_url.as_deref(),
        };
        value.unwrap_or("").to_string()
    }

    /// Signed fields as a mapping, excluding the signature itself.
    pub fn signature_fields(&self) -> FieldValues {
        SignatureField::ALL
            .iter()
            .map(|field| (field.as_str().to_string(), self.field_value(*field)))
            .collect()
    }

    /// Ordered form fields: every signed field followed by `signature`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = SignatureField::ALL
            .iter()
            .map(|field| (field.as_str(), self.field_value(*field)))
            .collect();
        fields.push(("signature", self.signature.clone()));
        fields
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn order_amount(&self) -> u64 {
        self.order_amount
    }

    pub fn currency(&self) -> &'static str {
        CURRENCY
    }

    pub fn order_invoice_number(&self) -> Option<&str> {
        self.order_invoice_number.as_deref()
    }

    pub fn order_description(&self) -> &str {
        &self.order_description
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn agreement(&self) -> &Agreement {
        &self.agreement
    }

    pub fn success_url(&self) -> Option<&str> {
        self.success_url.as_deref()
    }

    pub fn error_url(&self) -> Option<&str> {
        self.error_url.as_deref()
    }

    pub fn cancel_url(&self) -> Option<&str> {
        self.cancel_url.as_deref()
    }

    /// Base64 HMAC-SHA256 signature over [`Self::signature_fields`].
    pub fn signature(&self) -> &str {
        &self.signature
    }
}
