//! Configuration error types

use thiserror::Error;

use crate::domain::signing::SigningError;

/// Errors that can occur while loading or building client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error("HTTP client construction failed: {0}")]
    HttpClient(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid connect timeout")]
    InvalidConnectTimeout,

    #[error("Invalid read timeout")]
    InvalidReadTimeout,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(&'static str),
}
