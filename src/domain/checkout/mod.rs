//! Checkout requests: operations, validation and signing.

mod builder;
mod operation;
mod request;

pub use builder::{CheckoutBuilder, MAX_INVOICE_LENGTH};
pub use operation::{Operation, PaymentMethod};
pub use request::{Agreement, CheckoutRequest, CURRENCY};
