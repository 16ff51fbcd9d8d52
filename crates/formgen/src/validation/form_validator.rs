// File: src/validation/form_validator.rs
// Purpose: Public validation entry point

use super::{UnrecognizedRule, ValidationResult};
use crate::config::ValidatorConfig;
use crate::error::SchemaError;
use crate::evaluator::{evaluate_attribute, EvaluationPolicy};
use crate::registry::RuleRegistry;
use crate::schema::{AttributeType, FormSchema};
use crate::state::FormData;
use crate::value::{RuleParam, Value};
use tracing::{debug, warn};

static MISSING: Value = Value::Null;

/// Validates submitted form data against a schema
///
/// Every call builds a fresh [`ValidationResult`]; the validator holds no
/// per-call state, so one instance can be shared freely.
///
/// # Example
///
/// ```
/// use formgen::{AttributeDescriptor, FormData, FormSchema, FormValidator};
///
/// let schema = FormSchema::new("Person")
///     .attribute(AttributeDescriptor::new("name").rule("required", true));
///
/// let data: FormData = [("name", "")].into_iter().collect();
/// let result = FormValidator::new().validate(&schema, &data);
///
/// assert!(!result.is_valid);
/// assert_eq!(result.message("name"), Some("This field is required"));
/// ```
#[derive(Debug, Clone)]
pub struct FormValidator {
    registry: RuleRegistry,
    policy: EvaluationPolicy,
}

impl FormValidator {
    /// Validator with the built-in rules and default policy
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_builtins(),
            policy: EvaluationPolicy::default(),
        }
    }

    /// Validator with the built-in rules, configured policy and message overrides
    pub fn with_config(config: &ValidatorConfig) -> Self {
        let mut validator = Self {
            registry: RuleRegistry::with_builtins(),
            policy: config.policy,
        };

        for (rule, template) in &config.messages {
            if !validator.registry.set_message(rule, template.clone()) {
                warn!("Message configured for unknown rule: {}", rule);
            }
        }

        validator
    }

    /// Register a custom rule (or replace a built-in one) with its message template
    pub fn add_validator<F>(&mut self, name: impl Into<String>, predicate: F, message: impl Into<String>)
    where
        F: Fn(&Value, &RuleParam, AttributeType) -> bool + Send + Sync + 'static,
    {
        self.registry.register(name, predicate, message);
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// Validate `data` against every validated attribute of `schema`.
    ///
    /// Attributes without a `validation` map get no entry. A missing value
    /// is validated as `Null`.
    pub fn validate(&self, schema: &FormSchema, data: &FormData) -> ValidationResult {
        let mut result = ValidationResult::success();

        for attr in schema.attributes.iter().filter(|attr| attr.is_validated()) {
            let value = data.get(&attr.code).unwrap_or(&MISSING);
            let report = evaluate_attribute(&self.registry, self.policy, attr, value);

            if report.failed {
                result.is_valid = false;
            }

            result
                .unrecognized
                .extend(report.unrecognized.into_iter().map(|rule| UnrecognizedRule {
                    attribute: attr.code.clone(),
                    rule,
                }));

            result.errors.insert(attr.code.clone(), report.error);
        }

        debug!(
            form = %schema.code,
            attributes = result.errors.len(),
            is_valid = result.is_valid,
            "Form validated"
        );

        result
    }

    /// Validate a schema and a state given as JSON.
    ///
    /// Both must be JSON objects; anything else is rejected with
    /// [`SchemaError::NotAnObject`] instead of producing a result.
    pub fn validate_json(
        &self,
        schema: &serde_json::Value,
        state: &serde_json::Value,
    ) -> Result<ValidationResult, SchemaError> {
        if !state.is_object() {
            return Err(SchemaError::NotAnObject("form state"));
        }

        let schema = FormSchema::from_json_value(schema)?;
        let data = FormData::from_json_value(&schema, state)?;
        Ok(self.validate(&schema, &data))
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}
