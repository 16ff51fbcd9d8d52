// File: src/rules.rs
// Purpose: Built-in rule predicates and their default message templates
//
// Every predicate answers "does the value pass?". A rule whose
// applicability condition is not met passes.

use crate::schema::AttributeType;
use crate::value::{RuleParam, Value};
use formgen_validation::{at_least, at_most, char_count, is_valid_email, matches_regex};

pub const REQUIRED: &str = "required";
pub const PATTERN: &str = "pattern";
pub const EMAIL: &str = "email";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const MIN_LENGTH: &str = "minlength";
pub const MAX_LENGTH: &str = "maxlength";

/// Default templates; `$$name$$` is replaced by the rule's parameter
pub const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (REQUIRED, "This field is required"),
    (PATTERN, "Invalid format"),
    (EMAIL, "Invalid email address"),
    (MIN, "Minimum allowed value: $$min$$"),
    (MAX, "Maximum allowed value: $$max$$"),
    (MIN_LENGTH, "Minimum number of characters: $$minlength$$"),
    (MAX_LENGTH, "Maximum number of characters: $$maxlength$$"),
];

/// Fails only when switched on and the value is absent
pub fn required(value: &Value, enabled: &RuleParam, _ty: AttributeType) -> bool {
    !enabled.is_truthy() || value.is_truthy()
}

pub fn pattern(value: &Value, pattern: &RuleParam, _ty: AttributeType) -> bool {
    if !value.is_truthy() {
        return true;
    }
    matches_regex(&value.to_string(), &pattern.to_string())
}

pub fn email(value: &Value, enabled: &RuleParam, _ty: AttributeType) -> bool {
    if !enabled.is_truthy() || !value.is_truthy() {
        return true;
    }
    is_valid_email(&value.to_string())
}

pub fn min(value: &Value, bound: &RuleParam, ty: AttributeType) -> bool {
    compare_bound(value, bound, ty, at_least::<f64>, at_least)
}

pub fn max(value: &Value, bound: &RuleParam, ty: AttributeType) -> bool {
    compare_bound(value, bound, ty, at_most::<f64>, at_most)
}

pub fn minlength(value: &Value, length: &RuleParam, ty: AttributeType) -> bool {
    if ty != AttributeType::String || !value.is_truthy() {
        return true;
    }
    at_least(char_count(&value.to_string()) as f64, length.as_number())
}

pub fn maxlength(value: &Value, length: &RuleParam, ty: AttributeType) -> bool {
    if ty != AttributeType::String || !value.is_truthy() {
        return true;
    }
    at_most(char_count(&value.to_string()) as f64, length.as_number())
}

// Dates compare as calendar dates; both sides must read as dates or the
// value fails. Numbers compare loosely, so `NaN` on either side fails.
fn compare_bound(
    value: &Value,
    bound: &RuleParam,
    ty: AttributeType,
    numbers: fn(f64, f64) -> bool,
    dates: fn(chrono::NaiveDate, chrono::NaiveDate) -> bool,
) -> bool {
    if !ty.is_ordered() || !value.is_truthy() {
        return true;
    }

    if ty == AttributeType::Date {
        return match (value.as_date(), bound.as_date()) {
            (Some(value), Some(bound)) => dates(value, bound),
            _ => false,
        };
    }

    numbers(value.as_number(), bound.as_number())
}
