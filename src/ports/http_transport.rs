//! HttpTransport port - The request/response primitive the API client composes.
//!
//! The SDK never opens sockets itself. An adapter (reqwest by default, scripted
//! doubles in tests) executes exactly one HTTP exchange per call; retry, backoff
//! and status mapping live above this port.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP methods used by the gateway API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A fully prepared outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Header name/value pairs, may include credentials.
    pub headers: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<String>,
    /// Read timeout for this exchange.
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

// Header values are omitted so the Authorization header never reaches logs.
impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &header_names)
            .field("has_body", &self.body.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The raw response of one exchange, any status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// True for statuses in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// I/O-level failure before a response status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("I/O error: {0}")]
    Io(String),

    /// The request could not be built, e.g. a malformed URL or header.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportFailure {
    /// Connect, timeout and I/O failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportFailure::InvalidRequest(_))
    }
}

/// Port executing a single HTTP exchange.
///
/// Implementations must be `Send + Sync` so one client can serve concurrent
/// callers. They return `Ok` for every received response, whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}
