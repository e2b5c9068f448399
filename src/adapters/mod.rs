//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest transport and the retrying gateway API client
//! - `storage` - Transaction repository implementations

pub mod http;
pub mod storage;

pub use http::{ApiClient, ReqwestTransport};
pub use storage::InMemoryTransactionRepository;
