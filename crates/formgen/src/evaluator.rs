// File: src/evaluator.rs
// Purpose: Evaluate one attribute's rules against its submitted value

use crate::registry::RuleRegistry;
use crate::schema::{AttributeDescriptor, AttributeType};
use crate::template::render_message;
use crate::validation::FieldError;
use crate::value::{parse_date, RuleParam, Value};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Message used when an unrecognized rule is configured to fail
pub const UNKNOWN_RULE_MESSAGE: &str = "Unknown validation rule: $$rule$$";

/// What to do with a rule name the registry does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRulePolicy {
    /// Treat the rule as passing; it is still listed in the result
    #[default]
    Ignore,
    /// Treat the rule as failing with [`UNKNOWN_RULE_MESSAGE`]
    Fail,
}

/// Which failing rule's message is kept when several fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrder {
    /// Each failure overwrites the previous one: the last failing rule in
    /// declaration order wins
    #[default]
    Last,
    /// The first failing rule in declaration order wins
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    #[serde(default)]
    pub unknown_rules: UnknownRulePolicy,

    #[serde(default)]
    pub message_order: MessageOrder,
}

/// Outcome of applying one rule to one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Passed,
    Failed(String),
    /// No rule of that name is registered
    Unrecognized,
}

/// Apply a single named rule to a single value.
///
/// On a `date` attribute a textual parameter holding an ISO date is used as
/// a date, so the comparison and the rendered message agree however the
/// schema was built.
pub fn apply_rule(
    registry: &RuleRegistry,
    name: &str,
    param: &RuleParam,
    value: &Value,
    attribute: &AttributeDescriptor,
) -> RuleOutcome {
    let Some(rule) = registry.lookup(name) else {
        return RuleOutcome::Unrecognized;
    };

    let param = resolve_param(param, attribute.attr_type);
    match rule.evaluate(value, &param, attribute.attr_type) {
        None => RuleOutcome::Passed,
        Some(message) => RuleOutcome::Failed(message),
    }
}

fn resolve_param(param: &RuleParam, ty: AttributeType) -> Cow<'_, RuleParam> {
    match (ty, param) {
        (AttributeType::Date, RuleParam::Text(text)) => match parse_date(text) {
            Some(date) => Cow::Owned(RuleParam::Date(date)),
            None => Cow::Borrowed(param),
        },
        _ => Cow::Borrowed(param),
    }
}

/// Result of evaluating every rule of one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReport {
    /// Final message (scalar) or per-item messages (repeatable)
    pub error: FieldError,
    /// At least one rule failed
    pub failed: bool,
    /// Rule names missing from the registry, in declaration order
    pub unrecognized: Vec<String>,
}

/// Evaluate all rules of `attribute` against `value`.
///
/// Rules run in declaration order without short-circuiting. For a
/// repeatable attribute every rule is applied to every item and the message
/// slot of each item is tracked on its own. The error sequence always has
/// one slot per submitted item; a `Null` value is an empty sequence and a
/// lone scalar is a sequence of one.
pub fn evaluate_attribute(
    registry: &RuleRegistry,
    policy: EvaluationPolicy,
    attribute: &AttributeDescriptor,
    value: &Value,
) -> AttributeReport {
    let items: &[Value] = if attribute.multiple {
        match value {
            Value::Array(items) => items.as_slice(),
            Value::Null => &[][..],
            scalar => std::slice::from_ref(scalar),
        }
    } else {
        std::slice::from_ref(value)
    };

    let mut slots: Vec<Option<String>> = vec![None; items.len()];
    let mut failed = false;
    let mut unrecognized = Vec::new();

    for (name, param) in attribute.rules() {
        if !registry.contains(name) {
            warn!(
                attribute = %attribute.code,
                rule = name,
                "Unrecognized validation rule"
            );
            unrecognized.push(name.to_string());
        }

        for (index, (item, slot)) in items.iter().zip(slots.iter_mut()).enumerate() {
            let message = match apply_rule(registry, name, param, item, attribute) {
                RuleOutcome::Passed => continue,
                RuleOutcome::Failed(message) => message,
                RuleOutcome::Unrecognized => match policy.unknown_rules {
                    UnknownRulePolicy::Ignore => continue,
                    UnknownRulePolicy::Fail => {
                        render_message(UNKNOWN_RULE_MESSAGE, &RuleParam::from(name))
                    }
                },
            };

            debug!(
                attribute = %attribute.code,
                rule = name,
                index,
                "Rule failed"
            );
            record(slot, message, policy.message_order);
            failed = true;
        }
    }

    let error = if attribute.multiple {
        FieldError::Multiple(slots.into_iter().map(Option::unwrap_or_default).collect())
    } else {
        FieldError::Single(slots.into_iter().next().flatten().unwrap_or_default())
    };

    AttributeReport {
        error,
        failed,
        unrecognized,
    }
}

fn record(slot: &mut Option<String>, message: String, order: MessageOrder) {
    match order {
        MessageOrder::Last => *slot = Some(message),
        MessageOrder::First => {
            slot.get_or_insert(message);
        }
    }
}
