//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur while validating user-provided field values.
///
/// These are conversational errors: the flow handlers translate each variant
/// into a re-prompt rather than surfacing it to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' is too short: needs at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: String,
    },

    #[error("CPF failed checksum validation")]
    CpfChecksum,

    #[error("Birth date is in the future or younger than the minimum age")]
    BirthDateOutOfRange,
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }
}
