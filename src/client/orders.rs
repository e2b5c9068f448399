//! Order API: retrieve, list, void and cancel.

use serde::Serialize;
use tokio::sync::watch;

use crate::adapters::http::ApiClient;
use crate::config::Endpoints;
use crate::domain::foundation::ValidationError;
use crate::domain::order::{Order, OrderListRequest, OrderListResponse};
use crate::ports::ApiError;

#[derive(Debug, Serialize)]
struct VoidRequest<'a> {
    order_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CancelRequest<'a> {
    order_id: &'a str,
}

/// Order endpoints of the gateway REST API.
#[derive(Debug, Clone)]
pub struct OrderResource {
    api: ApiClient,
    endpoints: Endpoints,
}

impl OrderResource {
    pub fn new(api: ApiClient, endpoints: Endpoints) -> Self {
        Self { api, endpoints }
    }

    /// Returns a copy whose calls abort pending retries once `cancel` is `true`.
    pub fn with_cancellation(&self, cancel: watch::Receiver<bool>) -> Self {
        Self {
            api: self.api.with_cancellation(cancel),
            endpoints: self.endpoints.clone(),
        }
    }

    pub async fn retrieve(&self, order_id: &str) -> Result<Order, ApiError> {
        require_order_id(order_id)?;
        self.api.get(&self.endpoints.order_detail(order_id)).await
    }

    pub async fn list(&self, request: &OrderListRequest) -> Result<OrderListResponse, ApiError> {
        self.api
            .get_with_query(&self.endpoints.order_list(), &request.to_query_params())
            .await
    }

    pub async fn void_transaction(
        &self,
        order_id: &str,
        reason: Option<&str>,
    ) -> Result<Order, ApiError> {
        require_order_id(order_id)?;
        tracing::info!(order_id, "Voiding order transaction");
        self.api
            .post(&self.endpoints.order_void(), &VoidRequest { order_id, reason })
            .await
    }

    pub async fn cancel(&self, order_id: &str) -> Result<Order, ApiError> {
        require_order_id(order_id)?;
        tracing::info!(order_id, "Cancelling order");
        self.api
            .post(&self.endpoints.order_cancel(), &CancelRequest { order_id })
            .await
    }
}

fn require_order_id(order_id: &str) -> Result<(), ValidationError> {
    if order_id.trim().is_empty() {
        return Err(ValidationError::empty_field("order_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, RetryPolicy};
    use crate::ports::{HttpRequest, HttpResponse, HttpTransport, TransportFailure};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const ORDER_JSON: &str = r#"{"id":"ORD-1","order_invoice_number":"INV-001","status":"cancelled","amount":100000}"#;

    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse::new(200, ORDER_JSON))
        }
    }

    fn resource() -> (OrderResource, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let api = ApiClient::new(
            transport.clone(),
            "MERCHANT_001",
            "secret",
            RetryPolicy::default(),
        );
        let orders = OrderResource::new(api, Endpoints::for_environment(Environment::Sandbox));
        (orders, transport)
    }

    #[tokio::test]
    async fn retrieve_gets_detail_url() {
        let (orders, transport) = resource();

        let order = orders.retrieve("ORD-1").await.unwrap();

        assert_eq!(order.id, "ORD-1");
        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].url,
            "https://pgapi-sandbox.sepay.vn/v1/order/detail/ORD-1"
        );
    }

    #[tokio::test]
    async fn empty_order_id_fails_before_any_request() {
        let (orders, transport) = resource();

        let err = orders.retrieve("").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(matches!(orders.cancel("  ").await, Err(ApiError::Validation(_))));
        assert!(matches!(
            orders.void_transaction("", None).await,
            Err(ApiError::Validation(_))
        ));

        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn void_posts_order_id_and_reason() {
        let (orders, transport) = resource();

        orders
            .void_transaction("ORD-1", Some("customer request"))
            .await
            .unwrap();
        orders.void_transaction("ORD-2", None).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].url,
            "https://pgapi-sandbox.sepay.vn/v1/order/voidTransaction"
        );
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"order_id":"ORD-1","reason":"customer request"}"#)
        );
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"order_id":"ORD-2"}"#));
    }

    #[tokio::test]
    async fn cancel_posts_order_id() {
        let (orders, transport) = resource();

        let order = orders.cancel("ORD-1").await.unwrap();

        assert_eq!(order.status, crate::domain::order::OrderStatus::Cancelled);
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].url, "https://pgapi-sandbox.sepay.vn/v1/order/cancel");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"order_id":"ORD-1"}"#));
    }
}
