// File: src/validation/mod.rs
// Purpose: Validation result types and the form validator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod form_validator;

pub use form_validator::FormValidator;

/// Error state of one attribute
///
/// Scalar attributes carry one message, repeatable attributes one message
/// per submitted item. An empty string means "no error".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldError {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldError {
    /// Initial (error-free) state for a scalar or repeatable attribute
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            FieldError::Multiple(vec![String::new()])
        } else {
            FieldError::Single(String::new())
        }
    }

    /// True when no message is set anywhere
    pub fn is_empty(&self) -> bool {
        match self {
            FieldError::Single(message) => message.is_empty(),
            FieldError::Multiple(messages) => messages.iter().all(String::is_empty),
        }
    }

    /// The first non-empty message
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldError::Single(message) => Some(message.as_str()).filter(|m| !m.is_empty()),
            FieldError::Multiple(messages) => messages
                .iter()
                .map(String::as_str)
                .find(|m| !m.is_empty()),
        }
    }
}

impl Default for FieldError {
    fn default() -> Self {
        FieldError::Single(String::new())
    }
}

/// A rule reference the registry could not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedRule {
    pub attribute: String,
    pub rule: String,
}

/// Result of one validation pass
///
/// Serializes to `{"isValid": bool, "<code>": "..." | ["...", ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,

    /// Rule names that were referenced but are not registered
    #[serde(rename = "unrecognizedRules", skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<UnrecognizedRule>,

    /// One entry per validated attribute
    #[serde(flatten)]
    pub errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            unrecognized: Vec::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Check if any attribute carries a message
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|error| !error.is_empty())
    }

    /// Get the error state of one attribute
    pub fn error(&self, code: &str) -> Option<&FieldError> {
        self.errors.get(code)
    }

    /// Get the scalar message of one attribute
    pub fn message(&self, code: &str) -> Option<&str> {
        match self.errors.get(code)? {
            FieldError::Single(message) => Some(message),
            FieldError::Multiple(_) => None,
        }
    }

    /// Get the per-item messages of one repeatable attribute
    pub fn messages(&self, code: &str) -> Option<&[String]> {
        match self.errors.get(code)? {
            FieldError::Multiple(messages) => Some(messages),
            FieldError::Single(_) => None,
        }
    }

    /// Codes of the attributes that carry at least one message
    pub fn failed_attributes(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|(_, error)| !error.is_empty())
            .map(|(code, _)| code.as_str())
            .collect()
    }
}
