//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised while validating a request before it is signed or sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{operation} requires {requirement}")]
    InvalidAmount {
        operation: String,
        requirement: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an operation-specific amount error.
    pub fn invalid_amount(operation: impl Into<String>, requirement: impl Into<String>) -> Self {
        ValidationError::InvalidAmount {
            operation: operation.into(),
            requirement: requirement.into(),
        }
    }

    /// Name of the offending field, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => Some(field),
            ValidationError::InvalidAmount { .. } => None,
        }
    }
}

/// Machine-readable error codes returned to webhook callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidToken,
    DuplicateTransaction,
    ValidationError,
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::DuplicateTransaction => "DUPLICATE_TRANSACTION",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("order_description");
        assert_eq!(format!("{}", err), "Field 'order_description' is required");
    }

    #[test]
    fn validation_error_too_long_displays_correctly() {
        let err = ValidationError::too_long("order_invoice_number", 100, 101);
        assert_eq!(
            format!("{}", err),
            "Field 'order_invoice_number' must be at most 100 characters, got 101"
        );
    }

    #[test]
    fn validation_error_invalid_amount_displays_correctly() {
        let err = ValidationError::invalid_amount("PURCHASE", "amount > 0");
        assert_eq!(format!("{}", err), "PURCHASE requires amount > 0");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn validation_error_exposes_field_name() {
        let err = ValidationError::invalid_format("success_url", "must use http or https");
        assert_eq!(err.field(), Some("success_url"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidToken), "INVALID_TOKEN");
        assert_eq!(
            format!("{}", ErrorCode::DuplicateTransaction),
            "DUPLICATE_TRANSACTION"
        );
    }

    #[test]
    fn error_codes_cover_webhook_responses_only() {
        let codes = [
            ErrorCode::InvalidToken,
            ErrorCode::DuplicateTransaction,
            ErrorCode::ValidationError,
            ErrorCode::StorageError,
        ];
        let rendered: Vec<String> = codes.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "INVALID_TOKEN",
                "DUPLICATE_TRANSACTION",
                "VALIDATION_ERROR",
                "STORAGE_ERROR"
            ]
        );
    }
}
