//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the SDK and the outside world. Adapters implement these ports.
//!
//! - `HttpTransport` - Executes one HTTP exchange (reqwest adapter by default)
//! - `ApiError` / `ErrorClass` - Error taxonomy of gateway API calls
//! - `TransactionRepository` - Idempotent storage of webhook transactions

mod api_error;
mod http_transport;
mod transaction_repository;

pub use api_error::{ApiError, ErrorBody, ErrorClass, NOT_FOUND_CODE};
pub use http_transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportFailure};
pub use transaction_repository::{
    RepositoryError, SaveResult, TransactionRecord, TransactionRepository,
};
