// File: src/session.rs
// Purpose: Form controller state (data + displayed errors) without rendering

use crate::schema::{AttributeType, FormSchema};
use crate::state::FormData;
use crate::submission::prepare_submission;
use crate::validation::{FieldError, FormValidator, ValidationResult};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

static INDEXED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\[(\d+)\]$").unwrap());
static INT_INPUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*$").unwrap());
static FLOAT_INPUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*\.?\d*$").unwrap());

/// Split an input name such as `phone[2]` into `("phone", 2)`
pub fn parse_indexed_name(name: &str) -> Option<(&str, usize)> {
    let captures = INDEXED_NAME.captures(name)?;
    let code = captures.get(1)?.as_str();
    let index = captures.get(2)?.as_str().parse().ok()?;
    Some((code, index))
}

/// Keystroke filter for numeric inputs.
///
/// `int` accepts an optional minus and digits, `float` additionally one
/// decimal point. Rejected input keeps `previous`. Other types pass through.
pub fn sanitize_numeric_input(ty: AttributeType, input: &str, previous: &str) -> String {
    let accepted = match ty {
        AttributeType::Int => INT_INPUT.is_match(input),
        AttributeType::Float => FLOAT_INPUT.is_match(input),
        _ => true,
    };

    if accepted {
        input.to_string()
    } else {
        previous.to_string()
    }
}

/// Data and displayed errors of one form being edited
///
/// Repeatable attributes keep their value array and error array the same
/// length through every add/remove.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub data: FormData,
    pub errors: BTreeMap<String, FieldError>,
}

impl FormSession {
    /// Every attribute starts empty: `""`, or `[""]` when repeatable
    pub fn new(schema: &FormSchema) -> Self {
        let mut data = FormData::new();
        let mut errors = BTreeMap::new();

        for attr in &schema.attributes {
            let initial = if attr.multiple {
                Value::Array(vec![Value::from("")])
            } else {
                Value::from("")
            };
            data.insert(attr.code.clone(), initial);
            errors.insert(attr.code.clone(), FieldError::empty(attr.multiple));
        }

        Self { data, errors }
    }

    pub fn set(&mut self, code: &str, value: impl Into<Value>) {
        if code.is_empty() {
            return;
        }
        self.data.insert(code, value);
    }

    /// Set one item of a repeatable attribute; out-of-range indexes are ignored
    pub fn set_item(&mut self, code: &str, index: usize, value: impl Into<Value>) {
        if let Some(Value::Array(items)) = self.data.get_mut(code) {
            if let Some(item) = items.get_mut(index) {
                *item = value.into();
            }
        }
    }

    /// Route an input name to [`set`](Self::set) or [`set_item`](Self::set_item)
    pub fn update_field(&mut self, name: &str, value: impl Into<Value>) {
        match parse_indexed_name(name) {
            Some((code, index)) => self.set_item(code, index, value),
            None => self.set(name, value),
        }
    }

    /// Append an empty item (and an empty error slot) to a repeatable attribute
    pub fn add_item(&mut self, code: &str) {
        if let Some(Value::Array(items)) = self.data.get_mut(code) {
            items.push(Value::from(""));
        }
        if let Some(FieldError::Multiple(messages)) = self.errors.get_mut(code) {
            messages.push(String::new());
        }
    }

    /// Remove an item (and its error slot) from a repeatable attribute
    pub fn remove_item(&mut self, code: &str, index: usize) {
        if let Some(Value::Array(items)) = self.data.get_mut(code) {
            if index < items.len() {
                items.remove(index);
            }
        }
        if let Some(FieldError::Multiple(messages)) = self.errors.get_mut(code) {
            if index < messages.len() {
                messages.remove(index);
            }
        }
    }

    /// Merge a validation result over the displayed errors.
    ///
    /// Attributes absent from the result keep whatever they displayed before.
    pub fn apply(&mut self, result: &ValidationResult) {
        for (code, error) in &result.errors {
            self.errors.insert(code.clone(), error.clone());
        }
    }

    /// Validate, merge the errors, and on success return the submission payload
    pub fn submit(
        &mut self,
        validator: &FormValidator,
        schema: &FormSchema,
    ) -> Result<serde_json::Map<String, serde_json::Value>, ValidationResult> {
        let result = validator.validate(schema, &self.data);
        self.apply(&result);

        if !result.is_valid {
            debug!(form = %schema.code, failed = ?result.failed_attributes(), "Submission rejected");
            return Err(result);
        }

        Ok(prepare_submission(schema, &self.data))
    }
}
