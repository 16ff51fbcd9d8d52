// File: src/value.rs
// Purpose: Submitted field values and rule parameters

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted value for one attribute
///
/// Repeatable attributes hold an `Array` of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(NaiveDate),
    Array(Vec<Value>),
}

impl Value {
    /// Whether the value counts as present
    ///
    /// `Null`, `false`, `0`, `NaN` and the empty string are absent.
    /// Dates and arrays (even empty ones) are always present.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Date(_) => true,
            Value::Array(_) => true,
        }
    }

    /// Numeric reading of the value, `NaN` when there is none
    ///
    /// Numeric text such as `"42"` or `" 2.5 "` is parsed, so values typed
    /// into text inputs compare like numbers.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            Value::Date(_) | Value::Array(_) => f64::NAN,
        }
    }

    /// Calendar date held by the value; ISO text is accepted as well
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::String(s) => parse_date(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&items.join(","))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Parameter attached to a rule in a schema's `validation` map
///
/// Textual dates are turned into `Date` when the schema is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl RuleParam {
    /// Whether the rule is switched on (`required: true`, `email: true`)
    pub fn is_truthy(&self) -> bool {
        match self {
            RuleParam::Bool(b) => *b,
            RuleParam::Number(n) => *n != 0.0 && !n.is_nan(),
            RuleParam::Text(s) => !s.is_empty(),
            RuleParam::Date(_) => true,
        }
    }

    /// Numeric reading of the parameter, `NaN` when there is none
    pub fn as_number(&self) -> f64 {
        match self {
            RuleParam::Bool(b) => f64::from(u8::from(*b)),
            RuleParam::Number(n) => *n,
            RuleParam::Text(s) => parse_number(s),
            RuleParam::Date(_) => f64::NAN,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RuleParam::Date(d) => Some(*d),
            RuleParam::Text(s) => parse_date(s),
            _ => None,
        }
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Bool(b) => write!(f, "{}", b),
            RuleParam::Number(n) => f.write_str(&format_number(*n)),
            RuleParam::Text(s) => f.write_str(s),
            RuleParam::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<bool> for RuleParam {
    fn from(b: bool) -> Self {
        RuleParam::Bool(b)
    }
}

impl From<f64> for RuleParam {
    fn from(n: f64) -> Self {
        RuleParam::Number(n)
    }
}

impl From<i32> for RuleParam {
    fn from(n: i32) -> Self {
        RuleParam::Number(f64::from(n))
    }
}

impl From<&str> for RuleParam {
    fn from(s: &str) -> Self {
        RuleParam::Text(s.to_string())
    }
}

impl From<String> for RuleParam {
    fn from(s: String) -> Self {
        RuleParam::Text(s)
    }
}

impl From<NaiveDate> for RuleParam {
    fn from(d: NaiveDate) -> Self {
        RuleParam::Date(d)
    }
}

/// Format a number without a trailing `.0` for integral values
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse numeric text; blank text is zero and anything else unparseable is `NaN`
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
}
