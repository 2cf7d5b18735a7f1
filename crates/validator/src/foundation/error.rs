//! Result types for chains that run without a sink.
//!
//! A chain built without a [`Note`](crate::note::Note) cannot record
//! messages anywhere, so its first failure stops it and is reported through
//! [`Validated`] or [`ValidationError`] instead.

use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The first failure of a detached chain.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldnote_validator::prelude::*;
///
/// let err = NoteFirstValidator::valid_detached(Some("".to_string()))
///     .required_with("name is required")
///     .into_result()
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Validation error: name is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation error: {message}")]
pub struct ValidationError {
    /// Field the chain was validating, if it had one.
    pub field: Option<String>,
    /// The formatted failure message.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for an optional field.
    pub fn new(field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            field: field.map(str::to_owned),
            message: message.into(),
        }
    }
}

// ============================================================================
// VALIDATED
// ============================================================================

/// Outcome of a chain: the (possibly converted) value, or every message the
/// chain recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    /// No rule of the chain failed.
    Valid(T),
    /// Messages recorded by the chain, in evaluation order.
    Invalid(Vec<String>),
}

impl<T> Validated<T> {
    /// Returns `true` for [`Validated::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns `true` for [`Validated::Invalid`].
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Recorded messages; empty when valid.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(messages) => messages,
        }
    }

    /// Maps the valid value.
    pub fn map<U, F>(self, f: F) -> Validated<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Valid(value) => Validated::Valid(f(value)),
            Self::Invalid(messages) => Validated::Invalid(messages),
        }
    }

    /// Converts into a `Result`, keeping every message.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(messages) => Err(messages),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Validated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(value) => write!(f, "valid: {value:?}"),
            Self::Invalid(messages) => {
                write!(f, "invalid ({} message(s))", messages.len())?;
                for message in messages {
                    write!(f, "\n  - {message}")?;
                }
                Ok(())
            }
        }
    }
}
