//! Storage Adapters
//!
//! Implementations of the TransactionRepository port.
//!
//! - **InMemoryTransactionRepository** - Stores transactions in memory (testing/development)

mod in_memory_transaction_repository;

pub use in_memory_transaction_repository::InMemoryTransactionRepository;
