//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Quoted or dotted local part, then either a bracketed IPv4 literal or a
// dotted domain ending in an alphabetic TLD of at least two letters.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

/// Validates email shape
///
/// The address is lower-cased before matching, so the check is
/// case-insensitive.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&email.to_lowercase())
}
