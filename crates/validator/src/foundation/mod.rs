//! Shared result and error types.
//!
//! - [`ValidationError`]: first failure of a chain that has no sink
//! - [`Validated`]: explicit `Valid(value) | Invalid(messages)` outcome

pub mod error;

pub use error::{Validated, ValidationError};

/// Result of a detached chain.
pub type ValidationResult<T> = Result<T, ValidationError>;
