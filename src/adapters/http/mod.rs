//! HTTP Adapters
//!
//! - **ReqwestTransport** - `HttpTransport` over a pooled reqwest client
//! - **ApiClient** - Authenticated, retrying JSON client on top of any transport

mod api_client;
mod reqwest_transport;

pub use api_client::{basic_auth_header, ApiClient, USER_AGENT};
pub use reqwest_transport::ReqwestTransport;
