//! Integration tests for the webhook receiving pipeline.
//!
//! These tests verify the handler wiring end to end:
//! 1. Authenticated payloads are recorded once with their payment identifier
//! 2. Failures map to the HTTP status and JSON body the endpoint should answer

use std::sync::Arc;

use serde_json::json;

use sepay::adapters::storage::InMemoryTransactionRepository;
use sepay::application::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};
use sepay::config::WebhookConfig;
use sepay::domain::webhook::{TransferType, WebhookError};
use sepay::ports::TransactionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

const AUTHORIZATION: &str = "Apikey wh_live_4f9a2c";

fn payload(id: i64, content: &str, transfer_type: &str) -> Vec<u8> {
    json!({
        "id": id,
        "gateway": "MBBank",
        "transactionDate": "2024-03-02 08:15:42",
        "accountNumber": "0903123456",
        "subAccount": "VQRQ0001",
        "code": null,
        "content": content,
        "transferType": transfer_type,
        "description": "BankAPINotify MB",
        "transferAmount": 250000,
        "referenceCode": "MBVCB.3278907687",
        "accumulated": 19077000
    })
    .to_string()
    .into_bytes()
}

fn setup() -> (HandleWebhookHandler, Arc<InMemoryTransactionRepository>) {
    let repo = Arc::new(InMemoryTransactionRepository::new());
    let config = WebhookConfig::new("wh_live_4f9a2c").with_pattern_prefix("SEVQR");
    (HandleWebhookHandler::from_config(&config, repo.clone()), repo)
}

fn command(authorization: &str, body: Vec<u8>) -> HandleWebhookCommand {
    HandleWebhookCommand {
        authorization: Some(authorization.to_string()),
        payload: body,
    }
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[tokio::test]
async fn incoming_transfer_is_recorded_with_identifier() {
    let (handler, repo) = setup();

    let result = handler
        .handle(command(AUTHORIZATION, payload(92704, "SEVQR thanh toan SEVQR12345 MBVCB", "in")))
        .await
        .unwrap();

    assert_eq!(
        result,
        HandleWebhookResult::Recorded {
            transaction_id: 92704,
            transfer_type: TransferType::In,
            amount: 250_000,
            payment_identifier: Some("12345".to_string()),
        }
    );

    let stored = repo.find_by_id(92704).await.unwrap().unwrap();
    assert_eq!(stored.gateway, "MBBank");
    assert_eq!(stored.sub_account.as_deref(), Some("VQRQ0001"));
}

#[tokio::test]
async fn outgoing_transfer_is_recorded() {
    let (handler, _repo) = setup();

    let result = handler
        .handle(command(AUTHORIZATION, payload(92705, "chuyen tien", "out")))
        .await
        .unwrap();

    let HandleWebhookResult::Recorded {
        transfer_type,
        payment_identifier,
        ..
    } = result;
    assert_eq!(transfer_type, TransferType::Out);
    assert!(payment_identifier.is_none());
}

#[tokio::test]
async fn scheme_is_case_insensitive_and_parameters_ignored() {
    let (handler, _repo) = setup();

    let result = handler
        .handle(command("APIKEY wh_live_4f9a2c, realm=sepay", payload(1, "SEVQR1", "in")))
        .await;

    assert!(result.is_ok());
}

// =============================================================================
// Error Response Tests
// =============================================================================

#[tokio::test]
async fn redelivered_transaction_answers_200_duplicate() {
    let (handler, repo) = setup();

    handler
        .handle(command(AUTHORIZATION, payload(500, "SEVQR500", "in")))
        .await
        .unwrap();
    let err = handler
        .handle(command(AUTHORIZATION, payload(500, "SEVQR500", "in")))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::DuplicateTransaction(500)));
    assert_eq!(err.status_code(), 200);
    assert_eq!(err.error_body().error, "DUPLICATE_TRANSACTION");
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn bearer_token_answers_401() {
    let (handler, repo) = setup();

    let err = handler
        .handle(command("Bearer wh_live_4f9a2c", payload(1, "SEVQR1", "in")))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert_eq!(err.error_body().error, "INVALID_TOKEN");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn unknown_transfer_type_answers_400() {
    let (handler, _repo) = setup();

    let err = handler
        .handle(command(AUTHORIZATION, payload(1, "SEVQR1", "sideways")))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::ParseError(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.error_body().error, "VALIDATION_ERROR");
}
