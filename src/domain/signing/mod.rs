//! Canonical signing protocol for checkout requests and callbacks.
//!
//! A signature is the Base64 HMAC-SHA256 of a fixed-order message built from
//! [`SignatureField::ALL`]. Both the checkout builder and callback verification
//! go through [`Signer`].

mod constant_time;
mod field;
mod message;
mod signer;

pub use constant_time::constant_time_eq;
pub use field::SignatureField;
pub use message::{build_message, FieldValues};
pub use signer::{Signer, SigningError};
