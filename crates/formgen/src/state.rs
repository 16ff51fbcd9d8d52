// File: src/state.rs
// Purpose: Submitted form data keyed by attribute code

use crate::error::SchemaError;
use crate::schema::{AttributeType, FormSchema};
use crate::value::{parse_date, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Snapshot of submitted values, one per attribute code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: IndexMap<String, Value>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from JSON, reading values the way the schema types them.
    ///
    /// ISO text in `date` attributes becomes a date (item by item for
    /// repeatable attributes); text that is not a date is kept as text.
    pub fn from_json_value(schema: &FormSchema, json: &JsonValue) -> Result<Self, SchemaError> {
        let JsonValue::Object(map) = json else {
            return Err(SchemaError::NotAnObject("form state"));
        };

        let mut fields = IndexMap::with_capacity(map.len());
        for (code, raw) in map {
            let mut value: Value = serde_json::from_value(raw.clone())?;

            let is_date = schema
                .get(code)
                .is_some_and(|attr| attr.attr_type == AttributeType::Date);
            if is_date {
                value = coerce_dates(value);
            }

            fields.insert(code.clone(), value);
        }

        Ok(Self { fields })
    }

    /// Get a field value
    pub fn get(&self, code: &str) -> Option<&Value> {
        self.fields.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Value> {
        self.fields.get_mut(code)
    }

    /// Set a field value, returning the previous one
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(code.into(), value.into())
    }

    /// Check if a field exists
    pub fn has(&self, code: &str) -> bool {
        self.fields.contains_key(code)
    }

    /// Get all field codes
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(code, value)| (code.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(code, value)| (code.into(), value.into()))
                .collect(),
        }
    }
}

fn coerce_dates(value: Value) -> Value {
    match value {
        Value::String(text) => match parse_date(&text) {
            Some(date) => Value::Date(date),
            None => Value::String(text),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_dates).collect()),
        other => other,
    }
}
