// File: src/schema.rs
// Purpose: Form schema model (attribute descriptors and their rules)

use crate::error::SchemaError;
use crate::value::{parse_date, RuleParam};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys the serialized validation result uses next to the attribute codes
pub const RESERVED_CODES: [&str; 2] = ["isValid", "unrecognizedRules"];

/// Attribute data type; decides which comparison semantics apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Int,
    Float,
    #[default]
    String,
    Date,
    Boolean,
    Enum,
}

impl AttributeType {
    /// Types that support `min` / `max`
    pub fn is_ordered(self) -> bool {
        matches!(self, AttributeType::Int | AttributeType::Float | AttributeType::Date)
    }
}

/// One form field: identity, type, repeatability and rules
///
/// `validation` keeps the declaration order of its rules, which decides
/// which failure message is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub code: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "type")]
    pub attr_type: AttributeType,

    #[serde(default)]
    pub multiple: bool,

    /// Name of the option list an `enum` attribute draws from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<IndexMap<String, RuleParam>>,
}

impl AttributeDescriptor {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: String::new(),
            attr_type: AttributeType::default(),
            multiple: false,
            enum_type: None,
            validation: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn of_type(mut self, attr_type: AttributeType) -> Self {
        self.attr_type = attr_type;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn enum_type(mut self, enum_type: impl Into<String>) -> Self {
        self.enum_type = Some(enum_type.into());
        self
    }

    /// Append a rule; declaring a rule twice keeps its original position
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<RuleParam>) -> Self {
        self.validation
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), param.into());
        self
    }

    /// Rules in declaration order; empty for unvalidated attributes
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleParam)> {
        self.validation
            .iter()
            .flat_map(|rules| rules.iter().map(|(name, param)| (name.as_str(), param)))
    }

    pub fn is_validated(&self) -> bool {
        self.validation.is_some()
    }
}

/// A form: identifier plus ordered attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub code: String,

    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl FormSchema {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up an attribute by code
    pub fn get(&self, code: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|attr| attr.code == code)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Parse and normalize a schema from JSON
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject("form schema"));
        }

        let mut schema: FormSchema = serde_json::from_value(value.clone())?;
        schema.normalize()?;
        Ok(schema)
    }

    /// Reject duplicate or reserved codes and turn textual `min` / `max`
    /// bounds of date attributes into dates
    pub fn normalize(&mut self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();

        for attr in &mut self.attributes {
            if RESERVED_CODES.contains(&attr.code.as_str()) {
                return Err(SchemaError::ReservedCode(attr.code.clone()));
            }
            if !seen.insert(attr.code.clone()) {
                return Err(SchemaError::DuplicateCode(attr.code.clone()));
            }

            if attr.attr_type != AttributeType::Date {
                continue;
            }

            let Some(rules) = attr.validation.as_mut() else {
                continue;
            };

            for rule in ["min", "max"] {
                if let Some(param) = rules.get_mut(rule) {
                    if let RuleParam::Text(text) = param {
                        let date = parse_date(text).ok_or_else(|| SchemaError::InvalidDate {
                            attribute: attr.code.clone(),
                            rule: rule.to_string(),
                            value: text.clone(),
                        })?;
                        *param = RuleParam::Date(date);
                    }
                }
            }
        }

        Ok(())
    }
}
