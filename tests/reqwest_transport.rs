//! Integration tests for the reqwest transport against a mock gateway.
//!
//! These tests verify the wire contract of the order API:
//! 1. Basic auth, JSON and User-Agent headers are sent
//! 2. Query parameters and JSON bodies are encoded
//! 3. Gateway error statuses map to the error taxonomy

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sepay::adapters::http::USER_AGENT;
use sepay::client::SepayClient;
use sepay::config::ClientConfig;
use sepay::domain::order::{OrderListRequest, OrderStatus};
use sepay::ports::ApiError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn order_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "order_invoice_number": "INV-001",
        "status": status,
        "amount": 100000,
        "currency": "VND",
        "created_at": "2024-01-15 10:30:00"
    })
}

fn client(server: &MockServer) -> SepayClient {
    let config = ClientConfig::new("MERCHANT_001", "spsk_test_secret")
        .with_api_base_url(server.uri())
        .with_max_retries(1)
        .with_retry_delay(Duration::from_millis(10));
    SepayClient::new(config).unwrap()
}

// =============================================================================
// Request Tests
// =============================================================================

#[tokio::test]
async fn retrieve_sends_auth_and_json_headers() {
    let server = MockServer::start().await;
    let auth = format!("Basic {}", STANDARD.encode("MERCHANT_001:spsk_test_secret"));

    Mock::given(method("GET"))
        .and(path("/v1/order/detail/ORD-1"))
        .and(header("Authorization", auth.as_str()))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("ORD-1", "completed")))
        .expect(1)
        .mount(&server)
        .await;

    let order = client(&server).orders().retrieve("ORD-1").await.unwrap();

    assert_eq!(order.id, "ORD-1");
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.invoice_number.as_deref(), Some("INV-001"));
    assert!(order.created_at.is_some());
}

#[tokio::test]
async fn list_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/order"))
        .and(query_param("per_page", "20"))
        .and(query_param("page", "2"))
        .and(query_param("order_status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json("ORD-1", "pending"), order_json("ORD-2", "pending")],
            "total": 42,
            "page": 2,
            "per_page": 20,
            "total_pages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = OrderListRequest::new()
        .with_page(2)
        .with_status(OrderStatus::Pending);
    let page = client(&server).orders().list(&request).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert!(page.has_next_page());
    assert!(page.has_prev_page());
}

#[tokio::test]
async fn void_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order/voidTransaction"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"order_id": "ORD-1", "reason": "duplicate"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("ORD-1", "voided")))
        .expect(1)
        .mount(&server)
        .await;

    let order = client(&server)
        .orders()
        .void_transaction("ORD-1", Some("duplicate"))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Voided);
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn not_found_maps_to_not_found_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/order/detail/MISSING"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).orders().retrieve("MISSING").await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.error_code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/order/detail/ORD-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "UNAUTHORIZED",
            "message": "Invalid credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).orders().retrieve("ORD-1").await.unwrap_err();

    match err {
        ApiError::Authentication { code, message } => {
            assert_eq!(code.as_deref(), Some("UNAUTHORIZED"));
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_retried_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order/cancel"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server).orders().cancel("ORD-1").await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 503, .. }));
}
