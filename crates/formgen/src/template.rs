// File: src/template.rs
// Purpose: Render rule message templates

use crate::value::RuleParam;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

// `$$` ... `$$` with no `$` in between
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\$[^$]*\$\$").unwrap());

/// Replace every placeholder in `template` with the rule parameter.
///
/// Placeholders are found once in the original template and substituted in
/// a single pass, so a parameter containing `$$...$$` is inserted verbatim
/// and never expanded again. Date parameters are shown as `DD/MM/YYYY`.
pub fn render_message(template: &str, param: &RuleParam) -> String {
    let replacement = match param {
        RuleParam::Date(date) => humanize_date(*date),
        other => other.to_string(),
    };

    PLACEHOLDER
        .replace_all(template, NoExpand(&replacement))
        .into_owned()
}

/// Zero-padded `DD/MM/YYYY`
pub fn humanize_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
