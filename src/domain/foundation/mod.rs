//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by signing, checkout and webhook code.

mod errors;

pub use errors::{ErrorCode, ValidationError};
