//! String validation functions

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// Number of characters (not bytes) in `s`
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Regex pattern matching with a process-wide cache of compiled patterns.
///
/// The pattern is unanchored: it passes when it matches anywhere in `value`.
/// A pattern that fails to compile never matches.
pub fn matches_regex(value: &str, pattern: &str) -> bool {
    let mut cache = REGEX_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(regex) = cache.get(pattern) {
        return regex.is_match(value);
    }

    match Regex::new(pattern) {
        Ok(regex) => {
            let matched = regex.is_match(value);
            cache.insert(pattern.to_string(), regex);
            matched
        }
        Err(e) => {
            tracing::warn!("Invalid validation pattern {:?}: {}", pattern, e);
            false
        }
    }
}
