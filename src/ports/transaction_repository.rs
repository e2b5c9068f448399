//! TransactionRepository port - Persistence of received webhook transactions.
//!
//! The gateway may deliver the same transaction more than once (timeouts,
//! non-2xx answers). Recording each transaction id once makes webhook handling
//! idempotent; implementations should enforce uniqueness on `id`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::domain::webhook::{TransferType, WebhookPayload};

/// A recorded bank transaction, as received by webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Gateway transaction id.
    pub id: i64,
    pub gateway: String,
    pub transaction_date: NaiveDateTime,
    pub account_number: String,
    pub sub_account: Option<String>,
    pub code: Option<String>,
    pub content: String,
    pub transfer_type: TransferType,
    pub description: Option<String>,
    pub transfer_amount: i64,
    pub reference_code: Option<String>,
    /// Payment identifier extracted from `content`, if a prefix is configured.
    pub payment_identifier: Option<String>,
    /// When this process recorded the transaction.
    pub recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Builds a record from a webhook payload. The running balance is not kept.
    pub fn from_payload(payload: &WebhookPayload, payment_identifier: Option<String>) -> Self {
        Self {
            id: payload.id,
            gateway: payload.gateway.clone(),
            transaction_date: payload.transaction_date,
            account_number: payload.account_number.clone(),
            sub_account: payload.sub_account.clone(),
            code: payload.code.clone(),
            content: payload.content.clone(),
            transfer_type: payload.transfer_type,
            description: payload.description.clone(),
            transfer_amount: payload.transfer_amount,
            reference_code: payload.reference_code.clone(),
            payment_identifier,
            recorded_at: Utc::now(),
        }
    }
}

/// Result of attempting to save a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// First time seeing this transaction id.
    Inserted,
    /// A record with this id already exists.
    AlreadyExists,
}

/// Failure of the underlying store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("repository error: {0}")]
pub struct RepositoryError(pub String);

/// Port for storing received transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Find a recorded transaction by gateway id.
    async fn find_by_id(&self, id: i64) -> Result<Option<TransactionRecord>, RepositoryError>;

    /// Insert the record unless its id already exists.
    ///
    /// Must be atomic with respect to concurrent saves of the same id.
    async fn save(&self, record: TransactionRecord) -> Result<SaveResult, RepositoryError>;

    /// Delete records recorded before the timestamp, returning how many were removed.
    async fn delete_before(&self, timestamp: DateTime<Utc>) -> Result<u64, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> WebhookPayload {
        serde_json::from_str(
            r#"{"id":7,"gateway":"MB","transactionDate":"2024-03-01 08:00:00",
                "accountNumber":"0001","content":"DH123 thanh toan","transferType":"in",
                "transferAmount":150000,"accumulated":900000}"#,
        )
        .unwrap()
    }

    #[test]
    fn record_copies_payload_fields() {
        let record = TransactionRecord::from_payload(&payload(), Some("123".to_string()));

        assert_eq!(record.id, 7);
        assert_eq!(record.gateway, "MB");
        assert_eq!(record.transfer_type, TransferType::In);
        assert_eq!(record.transfer_amount, 150_000);
        assert_eq!(record.payment_identifier.as_deref(), Some("123"));
    }

    #[test]
    fn repository_error_displays_message() {
        let err = RepositoryError("disk full".to_string());
        assert_eq!(err.to_string(), "repository error: disk full");
    }
}
