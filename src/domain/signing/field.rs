//! The ordered set of fields covered by a checkout signature.

use std::fmt;

/// A field that participates in the canonical signing message.
///
/// The declaration order of [`SignatureField::ALL`] is part of the wire contract
/// shared with the gateway and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureField {
    Merchant,
    Env,
    Operation,
    PaymentMethod,
    OrderAmount,
    Currency,
    OrderInvoiceNumber,
    OrderDescription,
    CustomerId,
    AgreementId,
    AgreementName,
    AgreementType,
    AgreementPaymentFrequency,
    AgreementAmountPerPayment,
    SuccessUrl,
    ErrorUrl,
    CancelUrl,
}

impl SignatureField {
    /// All signed fields in canonical order.
    pub const ALL: [SignatureField; 17] = [
        SignatureField::Merchant,
        SignatureField::Env,
        SignatureField::Operation,
        SignatureField::PaymentMethod,
        SignatureField::OrderAmount,
        SignatureField::Currency,
        SignatureField::OrderInvoiceNumber,
        SignatureField::OrderDescription,
        SignatureField::CustomerId,
        SignatureField::AgreementId,
        SignatureField::AgreementName,
        SignatureField::AgreementType,
        SignatureField::AgreementPaymentFrequency,
        SignatureField::AgreementAmountPerPayment,
        SignatureField::SuccessUrl,
        SignatureField::ErrorUrl,
        SignatureField::CancelUrl,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureField::Merchant => "merchant",
            SignatureField::Env => "env",
            SignatureField::Operation => "operation",
            SignatureField::PaymentMethod => "payment_method",
            SignatureField::OrderAmount => "order_amount",
            SignatureField::Currency => "currency",
            SignatureField::OrderInvoiceNumber => "order_invoice_number",
            SignatureField::OrderDescription => "order_description",
            SignatureField::CustomerId => "customer_id",
            SignatureField::AgreementId => "agreement_id",
            SignatureField::AgreementName => "agreement_name",
            SignatureField::AgreementType => "agreement_type",
            SignatureField::AgreementPaymentFrequency => "agreement_payment_frequency",
            SignatureField::AgreementAmountPerPayment => "agreement_amount_per_payment",
            SignatureField::SuccessUrl => "success_url",
            SignatureField::ErrorUrl => "error_url",
            SignatureField::CancelUrl => "cancel_url",
        }
    }
}

impl fmt::Display for SignatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
