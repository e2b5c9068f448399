//! In-Memory Transaction Repository
//!
//! Keeps webhook transactions in a map keyed by transaction id.
//! Suitable for tests, development and single-process receivers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{RepositoryError, SaveResult, TransactionRecord, TransactionRepository};

/// In-memory store of received transactions
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    records: Arc<RwLock<HashMap<i64, TransactionRecord>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Clear all stored transactions (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<TransactionRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn save(&self, record: TransactionRecord) -> Result<SaveResult, RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            Ok(SaveResult::AlreadyExists)
        } else {
            records.insert(record.id, record);
            Ok(SaveResult::Inserted)
        }
    }

    async fn delete_before(&self, timestamp: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut records = self.records.write().await;
        let before_count = records.len();
        records.retain(|_, r| r.recorded_at >= timestamp);
        Ok((before_count - records.len()) as u64)
    }
}
