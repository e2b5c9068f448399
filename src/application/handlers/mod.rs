//! Command handlers.

pub mod webhook;

pub use webhook::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};
