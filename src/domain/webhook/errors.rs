//! Webhook error types.
//!
//! Defines the error conditions of inbound webhook handling, with the HTTP
//! status the receiving endpoint should answer and the JSON error body.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// `Authorization: Apikey` token missing or wrong.
    #[error("Authorization token is invalid or missing")]
    InvalidToken,

    /// Body is not a valid webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Payload parsed but violates a field constraint.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transaction id was already recorded.
    #[error("Duplicate transaction detected: {0}")]
    DuplicateTransaction(i64),

    /// Transaction store failed.
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// JSON body returned to the gateway on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl WebhookError {
    /// Returns true if the gateway should redeliver this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::StorageError(_))
    }

    /// Maps the error to the HTTP status code to answer.
    ///
    /// Duplicates are acknowledged with 200 so the gateway stops redelivering.
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::InvalidToken => 401,
            WebhookError::ParseError(_) | WebhookError::Validation(_) => 400,
            WebhookError::DuplicateTransaction(_) => 200,
            WebhookError::StorageError(_) => 500,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            WebhookError::InvalidToken => ErrorCode::InvalidToken,
            WebhookError::ParseError(_) | WebhookError::Validation(_) => {
                ErrorCode::ValidationError
            }
            WebhookError::DuplicateTransaction(_) => ErrorCode::DuplicateTransaction,
            WebhookError::StorageError(_) => ErrorCode::StorageError,
        }
    }

    /// Response body in the gateway's `{error, message}` shape.
    pub fn error_body(&self) -> ErrorBody {
        let message = match self {
            WebhookError::DuplicateTransaction(_) => "Transaction already processed".to_string(),
            WebhookError::Validation(err) => err.to_string(),
            WebhookError::StorageError(_) => "Failed to record transaction".to_string(),
            other => other.to_string(),
        };
        ErrorBody {
            error: self.error_code().to_string(),
            message,
        }
    }
}
