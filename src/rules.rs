//! Validation rules for labeled data records.
//!
//! Every record carries an ordered list of [`Rule`]s. Validation runs all of
//! them and collects every failure message; one failing rule never stops the
//! ones after it. The built-in order is:
//!
//! 1. [`Rule::Required`], present when the record is required
//! 2. [`Rule::Choices`], present when the record has allowed choices
//! 3. custom rules, in declaration order ([`Rule::Custom`], [`Rule::LongDate`])
//!
//! A rule sees the record itself plus a [`ValueMap`] snapshot of all the
//! records in the enclosing block, so cross-record checks are possible.
//!
//! ```rust
//! use jdx_write::{FieldSpec, ValueMap};
//!
//! let mut field = FieldSpec::string("TITLE")
//!     .required()
//!     .choices(["A", "B"])
//!     .instantiate();
//!
//! let errors = field.validate(&ValueMap::new());
//! assert_eq!(errors, vec!["DATA-LABEL '##TITLE=' is required.".to_string()]);
//!
//! field.set_value("C").unwrap();
//! let errors = field.validate(&ValueMap::new());
//! assert_eq!(
//!     errors,
//!     vec!["Unexpected value for DATA-LABEL '##TITLE='. Available values ['A', 'B'].".to_string()]
//! );
//! ```

use crate::{Field, Value, ValueMap};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Signature of a custom validation rule.
///
/// Returns `Err(message)` when the record's value is invalid.
pub type RuleFn = fn(&Field, &ValueMap) -> Result<(), String>;

/// Date-time patterns accepted by date records, in `chrono` syntax.
pub const DATE_FORMATS: [&str; 5] = [
    "%Y/%m/%d",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f%z",
];

/// A single validation check over a record and its sibling values.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    /// Fails when the record has no value.
    Required,
    /// Fails when a present value is not one of the record's choices.
    Choices,
    /// Fails when a present value matches none of [`DATE_FORMATS`].
    LongDate,
    /// A caller-supplied check.
    Custom(RuleFn),
}

impl Rule {
    /// Runs this rule, returning its failure messages (empty when the value passes).
    #[must_use]
    pub fn check(&self, field: &Field, siblings: &ValueMap) -> Vec<String> {
        let outcome = match self {
            Rule::Required => check_required(field),
            Rule::Choices => check_choices(field),
            Rule::LongDate => check_long_date(field),
            Rule::Custom(rule) => rule(field, siblings),
        };
        outcome.err().into_iter().collect()
    }
}

/// Runs every rule of `field` in order and collects all failure messages.
#[must_use]
pub fn validate(field: &Field, siblings: &ValueMap) -> Vec<String> {
    field
        .rules()
        .iter()
        .flat_map(|rule| rule.check(field, siblings))
        .collect()
}

fn check_required(field: &Field) -> Result<(), String> {
    if field.value().is_none() {
        return Err(format!("DATA-LABEL '##{}=' is required.", field.label()));
    }
    Ok(())
}

fn check_choices(field: &Field) -> Result<(), String> {
    let (Some(value), Some(choices)) = (field.value(), field.spec().choices_list()) else {
        return Ok(());
    };
    let text = value.to_string();
    if choices.iter().any(|choice| *choice == text) {
        return Ok(());
    }
    Err(format!(
        "Unexpected value for DATA-LABEL '##{}='. Available values {}.",
        field.label(),
        quoted_list(choices)
    ))
}

fn check_long_date(field: &Field) -> Result<(), String> {
    let Some(value) = field.value() else {
        return Ok(());
    };
    let accepted = match value {
        Value::Text(text) => is_long_date(text),
        Value::DateTime(_) => true,
        Value::Number(_) => false,
    };
    if accepted {
        Ok(())
    } else {
        Err(format!(
            "Unexpected date-time format. Allowed formats: {}",
            quoted_list(&DATE_FORMATS)
        ))
    }
}

/// Seconds followed by a dot and 1 to 6 fraction digits, optionally zoned.
///
/// chrono's `%.f` also accepts a missing or 9-digit fraction, so the two
/// fractional formats are gated on this first.
fn fractional_seconds_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\.\d{1,6}([+-]\d{2}:?\d{2})?$").unwrap()
    })
}

/// Returns `true` when `text` matches one of [`DATE_FORMATS`].
#[must_use]
pub fn is_long_date(text: &str) -> bool {
    let [date, minutes, seconds, fraction, zoned] = DATE_FORMATS;
    if NaiveDate::parse_from_str(text, date).is_ok()
        || NaiveDateTime::parse_from_str(text, minutes).is_ok()
        || NaiveDateTime::parse_from_str(text, seconds).is_ok()
    {
        return true;
    }
    fractional_seconds_pattern().is_match(text)
        && (NaiveDateTime::parse_from_str(text, fraction).is_ok()
            || DateTime::parse_from_str(text, zoned).is_ok())
}

/// Formats items as `['a', 'b']`.
pub(crate) fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
