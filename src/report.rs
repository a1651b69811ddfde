//! Soft validation results.
//!
//! A [`ValidationReport`] maps record names to their failure messages, in
//! output order. Records without problems are left out, so an empty report
//! means the document is valid. Reports never stop rendering; the
//! convenience writers hand them to the `log` facade as a warning instead.

use indexmap::IndexMap;
use serde::Serialize;

/// Record name to validation messages. Empty when everything is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationReport(IndexMap<String, Vec<String>>);

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the messages for `name`; an empty list is not stored.
    pub fn insert(&mut self, name: &str, errors: Vec<String>) {
        if !errors.is_empty() {
            self.0.entry(name.to_string()).or_default().extend(errors);
        }
    }

    /// Merges another report, prefixing each of its names with `prefix`.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationReport) {
        for (name, errors) in other.0 {
            self.insert(&format!("{}.{}", prefix, name), errors);
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    /// Pretty-printed JSON object, as written to the warning channel.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entries_are_dropped() {
        let mut report = ValidationReport::new();
        report.insert("title", Vec::new());
        assert!(report.is_valid());

        report.insert("yunits", vec!["missing".to_string()]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("yunits"), Some(&["missing".to_string()][..]));
    }

    #[test]
    fn test_merge_prefixed() {
        let mut inner = ValidationReport::new();
        inner.insert("owner", vec!["required".to_string()]);

        let mut report = ValidationReport::new();
        report.merge_prefixed("blocks[1]", inner);
        assert!(report.get("blocks[1].owner").is_some());
    }

    #[test]
    fn test_json() {
        let mut report = ValidationReport::new();
        report.insert("owner", vec!["required".to_string()]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["owner"][0], "required");
    }
}
