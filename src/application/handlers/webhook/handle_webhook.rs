//! HandleWebhookHandler - Command handler for gateway transaction webhooks.

use std::sync::Arc;

use crate::config::WebhookConfig;
use crate::domain::webhook::{
    extract_identifier, TokenAuthenticator, TransferType, WebhookError, WebhookPayload,
};
use crate::ports::{SaveResult, TransactionRecord, TransactionRepository};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    /// Raw `Authorization` header value, if any.
    pub authorization: Option<String>,
    /// Raw JSON body.
    pub payload: Vec<u8>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleWebhookResult {
    /// Transaction recorded for the first time.
    Recorded {
        transaction_id: i64,
        transfer_type: TransferType,
        amount: i64,
        /// Identifier found in the transfer content, if a prefix is configured.
        payment_identifier: Option<String>,
    },
}

/// Handler for inbound transaction webhooks.
///
/// Authenticates the call, parses and validates the payload, extracts the
/// payment identifier and records the transaction exactly once.
pub struct HandleWebhookHandler {
    authenticator: TokenAuthenticator,
    repository: Arc<dyn TransactionRepository>,
    pattern_prefix: Option<String>,
}

impl HandleWebhookHandler {
    pub fn new(
        authenticator: TokenAuthenticator,
        repository: Arc<dyn TransactionRepository>,
        pattern_prefix: Option<String>,
    ) -> Self {
        Self {
            authenticator,
            repository,
            pattern_prefix,
        }
    }

    pub fn from_config(config: &WebhookConfig, repository: Arc<dyn TransactionRepository>) -> Self {
        Self::new(
            TokenAuthenticator::new(config.api_key()),
            repository,
            config.pattern_prefix.clone(),
        )
    }

    pub async fn handle(
        &self,
        cmd: HandleWebhookCommand,
    ) -> Result<HandleWebhookResult, WebhookError> {
        // 1. Authenticate before touching the body
        self.authenticator
            .authenticate(cmd.authorization.as_deref())?;

        // 2. Parse and validate
        let payload = WebhookPayload::from_json(&cmd.payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        payload.validate()?;

        // 3. Extract payment identifier from transfer content
        let payment_identifier = self
            .pattern_prefix
            .as_deref()
            .and_then(|prefix| extract_identifier(&payload.content, prefix));

        // 4. Record once
        let record = TransactionRecord::from_payload(&payload, payment_identifier.clone());
        let saved = self
            .repository
            .save(record)
            .await
            .map_err(|e| WebhookError::StorageError(e.to_string()))?;

        if saved == SaveResult::AlreadyExists {
            tracing::info!(transaction_id = payload.id, "Duplicate webhook transaction");
            return Err(WebhookError::DuplicateTransaction(payload.id));
        }

        tracing::info!(
            transaction_id = payload.id,
            transfer_type = payload.transfer_type.as_str(),
            amount = payload.transfer_amount,
            payment_identifier = payment_identifier.as_deref().unwrap_or(""),
            "Webhook transaction recorded"
        );

        Ok(HandleWebhookResult::Recorded {
            transaction_id: payload.id,
            transfer_type: payload.transfer_type,
            amount: payload.transfer_amount,
            payment_identifier,
        })
    }
}
