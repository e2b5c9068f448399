//! SePay SDK - Client for the SePay payment gateway
//!
//! Builds HMAC-signed hosted-checkout requests, calls the order REST API with
//! bounded retry, and authenticates and records inbound transaction webhooks.
//!
//! - [`client::SepayClient`] - facade over checkout and order resources
//! - [`domain::signing`] - canonical message and HMAC-SHA256 signer
//! - [`application::HandleWebhookHandler`] - webhook receiving pipeline

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
