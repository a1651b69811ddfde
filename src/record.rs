//! Labeled data records (LDRs).
//!
//! A [`FieldSpec`] is the immutable schema template of one record: its label,
//! value format, allowed choices and validation rules. Blocks never mutate a
//! template. They call [`FieldSpec::instantiate`] to get an owned [`Field`]
//! and assign values to that copy only.
//!
//! ## Output
//!
//! A record renders as `##<LABEL>=` followed by a space and the value, word
//! wrapped at [`MAX_LINE_WIDTH`] columns. An inline comment goes on the first
//! line only:
//!
//! ```rust
//! use jdx_write::FieldSpec;
//!
//! let mut title = FieldSpec::text("TITLE").instantiate();
//! assert_eq!(title.render(), "##TITLE=");
//!
//! title.set_value("SOMETHING").unwrap();
//! title.set_comment(Some("comment"));
//! assert_eq!(title.render(), "##TITLE= SOMETHING  $$ comment");
//! ```

use crate::rules::{self, Rule, RuleFn};
use crate::{Error, Result, Value, ValueMap};
use std::fmt;

/// Soft limit for every output line.
pub const MAX_LINE_WIDTH: usize = 80;

/// Value format category of a record, as named by JCAMP-DX.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldFormat {
    /// Descriptive text for humans.
    Text,
    /// Alphanumeric field meant to be parsed by a computer.
    String,
    /// ASCII free format numeric.
    Affn,
    /// AFFN or ASCII squeezed difference form.
    AffnOrAsdf,
    /// A literal tuple descriptor such as `(AFFN, STRING, TEXT)`.
    Tuple(String),
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFormat::Text => f.write_str("TEXT"),
            FieldFormat::String => f.write_str("STRING"),
            FieldFormat::Affn => f.write_str("AFFN"),
            FieldFormat::AffnOrAsdf => f.write_str("AFFN|ASDF"),
            FieldFormat::Tuple(descriptor) => f.write_str(descriptor),
        }
    }
}

/// Schema template of a labeled data record.
///
/// Built with the constructor for its format and the chained modifiers:
///
/// ```rust
/// use jdx_write::{FieldFormat, FieldSpec};
///
/// let spec = FieldSpec::string("DATA TYPE")
///     .required()
///     .choices(["INFRARED SPECTRUM", "RAMAN SPECTRUM"])
///     .description("Type of the spectrum");
///
/// assert_eq!(spec.label(), "DATA TYPE");
/// assert_eq!(spec.format(), &FieldFormat::String);
/// assert!(spec.is_required());
/// ```
#[derive(Clone, Debug)]
pub struct FieldSpec {
    label: String,
    format: FieldFormat,
    choices: Option<Vec<String>>,
    description: Option<String>,
    comment: Option<String>,
    required: bool,
    date: bool,
    custom_rules: Vec<Rule>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(label: &str, format: FieldFormat) -> Self {
        FieldSpec {
            label: label.to_string(),
            format,
            choices: None,
            description: None,
            comment: None,
            required: false,
            date: false,
            custom_rules: Vec::new(),
        }
    }

    /// A `TEXT` record.
    #[must_use]
    pub fn text(label: &str) -> Self {
        Self::new(label, FieldFormat::Text)
    }

    /// A `STRING` record.
    #[must_use]
    pub fn string(label: &str) -> Self {
        Self::new(label, FieldFormat::String)
    }

    /// An `AFFN` record.
    #[must_use]
    pub fn affn(label: &str) -> Self {
        Self::new(label, FieldFormat::Affn)
    }

    /// A `STRING` record holding a date-time.
    ///
    /// Accepts text in one of [`DATE_FORMATS`](crate::rules::DATE_FORMATS) or
    /// a timestamp, which is normalized to `YYYY/MM/DD HH:MM:SS.ffffff±ZZZZ`.
    #[must_use]
    pub fn long_date(label: &str) -> Self {
        let mut spec = Self::new(label, FieldFormat::String);
        spec.date = true;
        spec.custom_rules.push(Rule::LongDate);
        spec
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restricts the value to the given case-sensitive choices.
    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        self.choices = (!choices.is_empty()).then_some(choices);
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the default inline comment, written after `$$`.
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Appends a custom validation rule.
    #[must_use]
    pub fn rule(mut self, rule: RuleFn) -> Self {
        self.custom_rules.push(Rule::Custom(rule));
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn format(&self) -> &FieldFormat {
        &self.format
    }

    #[must_use]
    pub fn choices_list(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        self.date
    }

    /// Full ordered rule list: required, choices, then custom rules.
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        let mut rules = Vec::with_capacity(self.custom_rules.len() + 2);
        if self.required {
            rules.push(Rule::Required);
        }
        if self.choices.is_some() {
            rules.push(Rule::Choices);
        }
        rules.extend(self.custom_rules.iter().copied());
        rules
    }

    /// Creates a fresh, independently owned record from this template.
    #[must_use]
    pub fn instantiate(&self) -> Field {
        Field {
            spec: self.clone(),
            rules: self.rules(),
            comment: self.comment.clone(),
            value: None,
        }
    }
}

/// A record owned by one block, with its own value slot.
#[derive(Clone, Debug)]
pub struct Field {
    spec: FieldSpec,
    rules: Vec<Rule>,
    comment: Option<String>,
    value: Option<Value>,
}

impl Field {
    #[must_use]
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.spec.label
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns `true` when a non-empty value is set.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_empty())
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<&str>) {
        self.comment = comment.map(str::to_string);
    }

    /// Assigns a value.
    ///
    /// Date records store text as given and normalize timestamps to
    /// `YYYY/MM/DD HH:MM:SS.ffffff±ZZZZ`; they reject numbers. Every other
    /// record rejects timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] when the value shape does not fit the record.
    pub fn set_value<V: Into<Value>>(&mut self, value: V) -> Result<()> {
        let value = value.into();
        let value = match (self.spec.is_date(), value) {
            (true, Value::DateTime(dt)) => Value::Text(Value::DateTime(dt).to_string()),
            (true, Value::Number(_)) => {
                return Err(Error::invalid_value(
                    self.label(),
                    "expected a date-time string or timestamp",
                ))
            }
            (false, Value::DateTime(_)) => {
                return Err(Error::invalid_value(
                    self.label(),
                    "timestamps are only accepted by date records",
                ))
            }
            (_, value) => value,
        };
        self.value = Some(value);
        Ok(())
    }

    pub fn clear_value(&mut self) {
        self.value = None;
    }

    /// Runs this record's rules against the sibling values of its block.
    #[must_use]
    pub fn validate(&self, siblings: &ValueMap) -> Vec<String> {
        rules::validate(self, siblings)
    }

    /// Renders the record lines, without a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let head = format!("##{}=", self.label());
        let mut lines = match &self.value {
            Some(value) => wrap_line(&format!("{} {}", head, value), MAX_LINE_WIDTH),
            None => Vec::new(),
        };
        if lines.is_empty() {
            lines.push(head);
        }
        if let Some(comment) = &self.comment {
            lines[0] = format!("{}  $$ {}", lines[0], comment);
        }
        lines.join("\n")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Greedy word wrap that only breaks at whitespace.
///
/// Whitespace between words on one line is kept (each whitespace character
/// becomes a space); whitespace at a line break is dropped. A word longer than
/// `width` is never split and ends up alone on its line.
///
/// ```rust
/// use jdx_write::record::wrap_line;
///
/// assert_eq!(wrap_line("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
/// assert_eq!(wrap_line("a verylongword b", 4), vec!["a", "verylongword", "b"]);
/// ```
#[must_use]
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    let mut gap = 0;

    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let is_space = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != is_space)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;

        let chunk_width = chunk.chars().count();
        if is_space {
            gap += chunk_width;
            continue;
        }

        if line.is_empty() {
            line.push_str(chunk);
            line_width = chunk_width;
        } else if line_width + gap + chunk_width <= width {
            line.extend(std::iter::repeat(' ').take(gap));
            line.push_str(chunk);
            line_width += gap + chunk_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(chunk);
            line_width = chunk_width;
        }
        gap = 0;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
