// File: src/error.rs
// Purpose: Errors raised while reading schemas and submitted state

use thiserror::Error;

/// Problems with the shape of a schema or a submitted state.
///
/// Failing validation rules are never reported here; they end up as
/// messages inside a [`crate::ValidationResult`].
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("expected a JSON object for the {0}")]
    NotAnObject(&'static str),

    #[error("failed to parse form schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate attribute code '{0}'")]
    DuplicateCode(String),

    #[error("attribute code '{0}' is reserved by the validation result")]
    ReservedCode(String),

    #[error("attribute '{attribute}': rule '{rule}' expects an ISO date, got '{value}'")]
    InvalidDate {
        attribute: String,
        rule: String,
        value: String,
    },
}
