//! HMAC-SHA256 signing of canonical checkout messages.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use super::constant_time::constant_time_eq;
use super::field::SignatureField;
use super::message::{build_message, FieldValues};

type HmacSha256 = Hmac<Sha256>;

/// Errors raised while constructing a [`Signer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Signs and verifies canonical messages with a merchant secret key.
///
/// The key only lives inside the prepared MAC state; `Debug` never prints it.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Creates a signer keyed with the given secret.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::InvalidConfiguration` if the secret is empty.
    pub fn new(secret_key: &str) -> Result<Self, SigningError> {
        if secret_key.is_empty() {
            return Err(SigningError::InvalidConfiguration("secret key is required"));
        }

        let mac = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|_| SigningError::InvalidConfiguration("HMAC-SHA256 rejected the key"))?;

        Ok(Self { mac })
    }

    /// Signs the fields, returning a padded standard Base64 HMAC-SHA256 digest.
    pub fn sign(&self, fields: &FieldValues) -> String {
        let message = build_message(fields);
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Checks a candidate signature against the fields.
    ///
    /// Missing or empty candidates are rejected without computing a digest.
    pub fn verify(&self, fields: &FieldValues, candidate: Option<&str>) -> bool {
        let candidate = match candidate {
            Some(c) if !c.is_empty() => c,
            _ => return false,
        };

        let expected = self.sign(fields);
        let matches = constant_time_eq(expected.as_bytes(), candidate.as_bytes());

        if !matches {
            tracing::debug!("Checkout signature mismatch");
        }

        matches
    }

    /// Names of the fields covered by the signature, in canonical order.
    pub fn signed_fields(&self) -> Vec<&'static str> {
        SignatureField::ALL.iter().map(|f| f.as_str()).collect()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &"HMAC-SHA256")
            .finish_non_exhaustive()
    }
}
