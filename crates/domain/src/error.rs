//! Domain error types.

use thiserror::Error;

/// Errors raised by domain rules, independent of transport or storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Event is full ({capacity} attending)")]
    CapacityReached { capacity: i32 },

    #[error("{0}")]
    Rule(String),
}

impl DomainError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
