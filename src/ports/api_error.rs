//! Error taxonomy for gateway API calls.

use serde::Deserialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::foundation::ValidationError;

use super::http_transport::TransportFailure;

/// Code attached to every 404 error.
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

/// Classification of a non-2xx HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// 4xx other than 401, 404 and 429, or any unexpected status.
    Client,
    /// 401.
    Auth,
    /// 404.
    NotFound,
    /// 429.
    RateLimited,
    /// 5xx.
    Server,
}

impl ErrorClass {
    /// Classifies a status; `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(ErrorClass::Auth),
            404 => Some(ErrorClass::NotFound),
            429 => Some(ErrorClass::RateLimited),
            500..=u16::MAX => Some(ErrorClass::Server),
            _ => Some(ErrorClass::Client),
        }
    }

    /// Rate limits and server errors are transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorClass::RateLimited | ErrorClass::Server)
    }
}

/// Errors returned by gateway API operations.
///
/// Messages come from the gateway's error body or a fixed generic text; request
/// headers and credentials never appear in them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client could not be configured.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Request rejected locally before sending.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 4xx other than 401/404/429.
    #[error("client error ({status}): {message}")]
    Client {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// 401; never retried.
    #[error("authentication failed: {message}")]
    Authentication {
        code: Option<String>,
        message: String,
    },

    /// 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 429 after retries were exhausted.
    #[error("rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        /// Seconds to wait, from the `Retry-After` header.
        retry_after_secs: Option<u64>,
    },

    /// 5xx after retries were exhausted.
    #[error("server error ({status}): {message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// I/O failure after retries were exhausted.
    #[error("transport error: {0}")]
    Transport(#[source] TransportFailure),

    /// A 2xx body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Cancelled while waiting to retry.
    #[error("request interrupted")]
    Interrupted,
}

impl ApiError {
    /// HTTP status the error was built from, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Authentication { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Gateway-provided error code, if any.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Client { code, .. }
            | ApiError::Authentication { code, .. }
            | ApiError::Server { code, .. } => code.as_deref(),
            ApiError::NotFound { .. } => Some(NOT_FOUND_CODE),
            _ => None,
        }
    }

    /// Whether the retry loop may try again after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited { .. } | ApiError::Server { .. } => true,
            ApiError::Transport(failure) => failure.is_retryable(),
            _ => false,
        }
    }

    /// Builds the terminal error for a non-2xx response.
    pub fn from_response(status: u16, body: &str, retry_after_secs: Option<u64>) -> Self {
        let parsed = ErrorBody::parse(body);
        let code = parsed.as_ref().and_then(|b| b.error.clone());
        let message = |generic: &str| {
            parsed
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| generic.to_string())
        };

        match ErrorClass::from_status(status) {
            Some(ErrorClass::Auth) => ApiError::Authentication {
                code,
                message: message("Authentication failed"),
            },
            Some(ErrorClass::NotFound) => ApiError::NotFound {
                message: message("Resource not found"),
            },
            Some(ErrorClass::RateLimited) => ApiError::RateLimited {
                message: message("Rate limit exceeded"),
                retry_after_secs,
            },
            Some(ErrorClass::Server) => ApiError::Server {
                status,
                code,
                message: message("Server error"),
            },
            Some(ErrorClass::Client) | None => ApiError::Client {
                status,
                code,
                message: message(if status == 400 { "Validation error" } else { "API error" }),
            },
        }
    }
}

/// Gateway error body: `{"error": "...", "message": "..."}`, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses a body, `None` if it is empty or not a JSON object.
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(body).ok()
    }
}
