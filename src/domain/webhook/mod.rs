//! Inbound webhook domain: authentication, payload and content matching.

mod errors;
mod pattern;
mod payload;
mod token;

pub use errors::{ErrorBody, WebhookError};
pub use pattern::extract_identifier;
pub use payload::{TransferType, WebhookPayload, TRANSACTION_DATE_FORMAT};
pub use token::{extract_token, is_valid_token, TokenAuthenticator};
