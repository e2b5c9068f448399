//! Domain layer containing signing, checkout, order and webhook types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared error vocabulary
//! - `signing` - Canonical message and HMAC-SHA256 signer
//! - `checkout` - Checkout request builder and validation
//! - `order` - Order API data types
//! - `webhook` - Webhook authentication, payload and content matching

pub mod checkout;
pub mod foundation;
pub mod order;
pub mod signing;
pub mod webhook;
