//! `Apikey` token extraction and comparison for inbound webhooks.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::signing::constant_time_eq;

use super::errors::WebhookError;

const APIKEY_PREFIX: &str = "apikey ";

/// Extracts the token of an `Authorization: Apikey <token>` header.
///
/// The scheme is matched case-insensitively at its first occurrence. The token
/// runs up to the first comma and is trimmed. Returns `None` for other schemes
/// or when nothing follows the prefix.
pub fn extract_token(header: Option<&str>) -> Option<String> {
    let header = header?;

    // ASCII lowercasing keeps byte offsets aligned with `header`.
    let start = header.to_ascii_lowercase().find(APIKEY_PREFIX)? + APIKEY_PREFIX.len();
    let rest = &header[start..];
    let token = rest.split(',').next().unwrap_or("").trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Constant-time token comparison; empty or missing values never match.
pub fn is_valid_token(provided: Option<&str>, expected: &str) -> bool {
    match provided {
        Some(provided) if !provided.is_empty() && !expected.is_empty() => {
            constant_time_eq(provided.as_bytes(), expected.as_bytes())
        }
        _ => false,
    }
}

/// Authenticates webhook calls against the configured API key.
#[derive(Debug, Clone)]
pub struct TokenAuthenticator {
    expected: SecretString,
}

impl TokenAuthenticator {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: SecretString::new(expected.into()),
        }
    }

    /// Checks the raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::InvalidToken` when the token is missing or wrong.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<(), WebhookError> {
        let token = extract_token(authorization);

        if is_valid_token(token.as_deref(), self.expected.expose_secret()) {
            Ok(())
        } else {
            tracing::warn!(
                token_present = token.is_some(),
                "Webhook authentication failed"
            );
            Err(WebhookError::InvalidToken)
        }
    }
}
