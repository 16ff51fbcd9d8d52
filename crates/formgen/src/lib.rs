//! # formgen
//!
//! Schema-driven form validation. A [`FormSchema`] lists attribute
//! descriptors, each optionally carrying named rules with parameters; a
//! [`FormValidator`] checks a snapshot of submitted values against it and
//! returns a validity verdict plus one message per attribute (or one per
//! item for repeatable attributes).
//!
//! ## Quick Start
//!
//! ```rust
//! use formgen::{FormSchema, FormValidator, FormData};
//!
//! let schema = FormSchema::from_json_str(r#"{
//!     "code": "Person",
//!     "attributes": [
//!         {"code": "firstName", "validation": {"required": true}},
//!         {"code": "age", "type": "int", "validation": {"min": 18}},
//!         {"code": "phone", "multiple": true, "validation": {"pattern": "^\\+\\d+$"}}
//!     ]
//! }"#).unwrap();
//!
//! let state = serde_json::json!({
//!     "firstName": "Ann",
//!     "age": "16",
//!     "phone": ["+380501234567", "bad"]
//! });
//! let data = FormData::from_json_value(&schema, &state).unwrap();
//!
//! let result = FormValidator::new().validate(&schema, &data);
//! assert!(!result.is_valid);
//! assert_eq!(result.message("age"), Some("Minimum allowed value: 18"));
//! assert_eq!(result.messages("phone").unwrap()[1], "Invalid format");
//! ```
//!
//! ## Built-in rules
//!
//! `required`, `pattern`, `email`, `min`, `max`, `minlength`, `maxlength`.
//! Custom rules are added with [`FormValidator::add_validator`].

pub mod config;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod session;
pub mod state;
pub mod submission;
pub mod template;
pub mod validation;
pub mod value;

pub use config::ValidatorConfig;
pub use error::SchemaError;
pub use evaluator::{
    apply_rule, evaluate_attribute, AttributeReport, EvaluationPolicy, MessageOrder, RuleOutcome,
    UnknownRulePolicy,
};
pub use registry::{Predicate, Rule, RuleRegistry};
pub use schema::{AttributeDescriptor, AttributeType, FormSchema};
pub use session::{parse_indexed_name, sanitize_numeric_input, FormSession};
pub use state::FormData;
pub use submission::prepare_submission;
pub use template::{humanize_date, render_message};
pub use validation::{FieldError, FormValidator, UnrecognizedRule, ValidationResult};
pub use value::{RuleParam, Value};
