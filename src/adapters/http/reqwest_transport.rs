//! reqwest implementation of the HttpTransport port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ConfigError;
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportFailure};

/// Executes requests with a shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose connections time out after `connect_timeout`.
    ///
    /// Read timeouts are applied per request from [`HttpRequest::timeout`].
    pub fn new(connect_timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one with custom TLS settings.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let timeout = request.timeout;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.as_str()),
            HttpMethod::Post => self.client.post(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error, timeout: Duration) -> TransportFailure {
    if e.is_builder() {
        TransportFailure::InvalidRequest(e.to_string())
    } else if e.is_timeout() {
        TransportFailure::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else if e.is_connect() {
        TransportFailure::Connect(e.to_string())
    } else {
        TransportFailure::Io(e.to_string())
    }
}
