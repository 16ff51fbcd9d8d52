//! Rule registry - named predicates and their message templates

use crate::rules;
use crate::schema::AttributeType;
use crate::template::render_message;
use crate::value::{RuleParam, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Rule predicate: `(value, parameter, attribute type) -> passes`
pub type Predicate = Arc<dyn Fn(&Value, &RuleParam, AttributeType) -> bool + Send + Sync>;

/// A registered rule: predicate plus default message template
#[derive(Clone)]
pub struct Rule {
    predicate: Predicate,
    message: String,
}

impl Rule {
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value, &RuleParam, AttributeType) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    pub fn check(&self, value: &Value, param: &RuleParam, ty: AttributeType) -> bool {
        (self.predicate)(value, param, ty)
    }

    /// `None` when the value passes, the rendered message otherwise
    pub fn evaluate(&self, value: &Value, param: &RuleParam, ty: AttributeType) -> Option<String> {
        if self.check(value, param, ty) {
            None
        } else {
            Some(render_message(&self.message, param))
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Registry of all known rules, keyed by name
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in rules
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_rules();
        registry
    }

    fn register_builtin_rules(&mut self) {
        let builtins: [(&str, fn(&Value, &RuleParam, AttributeType) -> bool); 7] = [
            (rules::REQUIRED, rules::required),
            (rules::PATTERN, rules::pattern),
            (rules::EMAIL, rules::email),
            (rules::MIN, rules::min),
            (rules::MAX, rules::max),
            (rules::MIN_LENGTH, rules::minlength),
            (rules::MAX_LENGTH, rules::maxlength),
        ];

        for (name, predicate) in builtins {
            let message = rules::DEFAULT_MESSAGES
                .iter()
                .find(|(rule, _)| *rule == name)
                .map(|(_, message)| *message)
                .unwrap_or_default();
            self.rules.insert(name.to_string(), Rule::new(predicate, message));
        }

        debug!("Registered {} built-in rules", self.rules.len());
    }

    /// Register a rule, replacing any rule (built-in included) of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F, message: impl Into<String>)
    where
        F: Fn(&Value, &RuleParam, AttributeType) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .rules
            .insert(name.clone(), Rule::new(predicate, message))
            .is_some();

        if replaced {
            debug!("Replaced rule: {}", name);
        } else {
            debug!("Registered rule: {}", name);
        }
    }

    /// Replace the message template of a registered rule.
    ///
    /// Returns `false` when no rule of that name exists.
    pub fn set_message(&mut self, name: &str, template: impl Into<String>) -> bool {
        match self.rules.get_mut(name) {
            Some(rule) => {
                rule.message = template.into();
                true
            }
            None => false,
        }
    }

    /// Get a rule by name
    pub fn lookup(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// All rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
