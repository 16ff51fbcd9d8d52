// File: src/submission.rs
// Purpose: Convert validated form data into the submitted JSON payload

use crate::schema::{AttributeType, FormSchema};
use crate::state::FormData;
use crate::value::{parse_number, Value};
use serde_json::{Map, Number, Value as JsonValue};

/// Build the JSON payload for validated data.
///
/// - `date` values become ISO-8601 timestamps at noon UTC
/// - `int` / `float` text becomes a JSON number; text that is not a number
///   becomes `""` and an empty string stays `""`
/// - everything else is passed through; repeatable attributes convert
///   item by item
///
/// Fields without an attribute in the schema are passed through as well.
pub fn prepare_submission(schema: &FormSchema, data: &FormData) -> Map<String, JsonValue> {
    data.iter()
        .map(|(code, value)| {
            let ty = schema.get(code).map(|attr| attr.attr_type).unwrap_or_default();
            (code.to_string(), convert(ty, value))
        })
        .collect()
}

fn convert(ty: AttributeType, value: &Value) -> JsonValue {
    match value {
        Value::Array(items) => JsonValue::Array(items.iter().map(|item| convert(ty, item)).collect()),
        _ => match ty {
            AttributeType::Date => date_payload(value),
            AttributeType::Int | AttributeType::Float => number_payload(value),
            _ => to_json(value),
        },
    }
}

fn date_payload(value: &Value) -> JsonValue {
    match value {
        Value::Date(date) => JsonValue::String(format!("{}T12:00:00.000Z", date.format("%Y-%m-%d"))),
        other => to_json(other),
    }
}

fn number_payload(value: &Value) -> JsonValue {
    let n = match value {
        Value::String(text) if text.is_empty() => return JsonValue::String(String::new()),
        Value::String(text) => parse_number(text),
        Value::Number(n) => *n,
        other => return to_json(other),
    };

    json_number(n).unwrap_or_else(|| JsonValue::String(String::new()))
}

// Integral values stay integral in the payload
fn json_number(n: f64) -> Option<JsonValue> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        return Some(JsonValue::Number(Number::from(n as i64)));
    }
    Number::from_f64(n).map(JsonValue::Number)
}

fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => json_number(*n).unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
    }
}
