//! Retrying gateway API client.
//!
//! Wraps an [`HttpTransport`] with merchant authentication, JSON content
//! negotiation, bounded retry with linear backoff and status-to-error mapping.
//!
//! # Retry Policy
//!
//! Attempt `n` (zero-based) that fails with 429, 5xx or an I/O error is retried
//! after `retry_delay * (n + 1)` while `n < max_retries`. Every other failure is
//! returned immediately. A cancellation receiver set with
//! [`ApiClient::with_cancellation`] aborts a pending backoff with
//! [`ApiError::Interrupted`].

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use tokio::time;

use crate::config::{ClientConfig, RetryPolicy};
use crate::domain::foundation::ValidationError;
use crate::ports::{
    ApiError, ErrorClass, HttpRequest, HttpResponse, HttpTransport, TransportFailure,
};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("sepay-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Authenticated, retrying client for the gateway REST API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
    authorization: SecretString,
    cancel: Option<watch::Receiver<bool>>,
}

impl ApiClient {
    /// Creates a client authenticating as `merchant_id` with HTTP Basic auth.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        merchant_id: &str,
        secret_key: &str,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            policy,
            authorization: SecretString::new(basic_auth_header(merchant_id, secret_key)),
            cancel: None,
        }
    }

    /// Creates a client from validated configuration.
    pub fn from_config(config: &ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(
            transport,
            &config.merchant_id,
            config.secret_key(),
            config.retry_policy(),
        )
    }

    /// Returns a clone whose calls stop retrying once `cancel` becomes `true`.
    pub fn with_cancellation(&self, cancel: watch::Receiver<bool>) -> Self {
        Self {
            cancel: Some(cancel),
            ..self.clone()
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.execute(HttpRequest::get(url)).await?;
        parse_body(&body)
    }

    /// GET a JSON resource with URL-encoded query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = url::Url::parse_with_params(url, params)
            .map_err(|e| ValidationError::invalid_format("url", e.to_string()))?;
        self.get(url.as_str()).await
    }

    /// GET the raw response body.
    pub async fn get_raw(&self, url: &str) -> Result<String, ApiError> {
        self.execute(HttpRequest::get(url)).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let json = serde_json::to_string(body)
            .map_err(|e| ValidationError::invalid_format("request_body", e.to_string()))?;
        let body = self.execute(HttpRequest::post(url, json)).await?;
        parse_body(&body)
    }

    /// Sends the request with auth and JSON headers, retrying transient failures.
    ///
    /// Returns the body of the first 2xx response.
    ///
    /// # Errors
    ///
    /// - `Authentication`, `NotFound`, `Client` - on the first such response
    /// - `RateLimited`, `Server`, `Transport` - once retries are exhausted
    /// - `Interrupted` - cancelled before or between attempts
    pub async fn execute(&self, request: HttpRequest) -> Result<String, ApiError> {
        let request = self.prepare(request);
        let max_retries = self.policy.max_retries;
        let mut cancel = self.cancel.clone();
        let mut attempt: u32 = 0;

        loop {
            if is_cancelled(&cancel) {
                return Err(ApiError::Interrupted);
            }

            tracing::debug!(
                method = request.method.as_str(),
                url = %request.url,
                attempt,
                "Sending gateway request"
            );

            let can_retry = attempt < max_retries;

            match self.transport.execute(request.clone()).await {
                Ok(response) if response.is_success() => {
                    tracing::debug!(status = response.status, attempt, "Gateway request succeeded");
                    return Ok(response.body);
                }
                Ok(response) => {
                    let retryable = ErrorClass::from_status(response.status)
                        .is_some_and(|class| class.is_retryable());

                    if !retryable || !can_retry {
                        let err = ApiError::from_response(
                            response.status,
                            &response.body,
                            parse_retry_after(&response),
                        );
                        tracing::warn!(
                            status = response.status,
                            attempt,
                            error = %err,
                            "Gateway request failed"
                        );
                        return Err(err);
                    }

                    tracing::warn!(
                        status = response.status,
                        attempt,
                        "Transient gateway response, retrying"
                    );
                }
                Err(TransportFailure::InvalidRequest(reason)) => {
                    tracing::warn!(attempt, error = %reason, "Gateway request could not be built");
                    return Err(ValidationError::invalid_format("request", reason).into());
                }
                Err(failure) => {
                    if !can_retry {
                        tracing::warn!(attempt, error = %failure, "Gateway transport failed");
                        return Err(ApiError::Transport(failure));
                    }

                    tracing::warn!(attempt, error = %failure, "Gateway transport failed, retrying");
                }
            }

            self.wait_before_retry(attempt, &mut cancel).await?;
            attempt += 1;
        }
    }

    fn prepare(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("Authorization", self.authorization.expose_secret().as_str())
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .with_header("User-Agent", USER_AGENT)
            .with_timeout(self.policy.read_timeout)
    }

    /// Sleeps for the backoff of `attempt`, waking early on cancellation.
    async fn wait_before_retry(
        &self,
        attempt: u32,
        cancel: &mut Option<watch::Receiver<bool>>,
    ) -> Result<(), ApiError> {
        let delay = self.policy.delay_for_attempt(attempt);

        let Some(rx) = cancel.as_mut() else {
            time::sleep(delay).await;
            return Ok(());
        };

        let sleep = time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return Ok(()),
                changed = rx.changed() => {
                    if changed.is_err() {
                        // Sender dropped: nobody can cancel any more.
                        (&mut sleep).await;
                        return Ok(());
                    }
                    if *rx.borrow() {
                        tracing::info!(attempt, "Gateway request cancelled during backoff");
                        return Err(ApiError::Interrupted);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("policy", &self.policy)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

/// `Basic base64(merchant_id:secret_key)`.
pub fn basic_auth_header(merchant_id: &str, secret_key: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", merchant_id, secret_key))
    )
}

fn is_cancelled(cancel: &Option<watch::Receiver<bool>>) -> bool {
    cancel.as_ref().is_some_and(|rx| *rx.borrow())
}

fn parse_retry_after(response: &HttpResponse) -> Option<u64> {
    response
        .header("Retry-After")
        .and_then(|v| v.trim().parse().ok())
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
