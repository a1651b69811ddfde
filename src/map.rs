//! Ordered snapshot of the record values in one block.
//!
//! Validation rules receive a [`ValueMap`] so they can look at sibling
//! records (for example a unit record that only makes sense for a given
//! `DATA TYPE`). The map keeps schema declaration order and also remembers
//! records that have no value yet.
//!
//! ## Examples
//!
//! ```rust
//! use jdx_write::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("title".to_string(), Some(Value::from("Spectrum")));
//! map.insert("owner".to_string(), None);
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("title").and_then(|v| v.as_str()), Some("Spectrum"));
//! assert!(map.contains_key("owner"));
//! assert!(map.get("owner").is_none());
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Record name to optional value, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValueMap(IndexMap<String, Option<Value>>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    /// Inserts a record value, returning the previous entry if the name was present.
    pub fn insert(&mut self, name: String, value: Option<Value>) -> Option<Option<Value>> {
        self.0.insert(name, value)
    }

    /// Returns the value of the named record, or `None` when the record is
    /// unknown or has no value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the record names, in declaration order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Option<Value>> {
        self.0.keys()
    }

    /// Returns an iterator over name/value pairs, in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Option<Value>> {
        self.0.iter()
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Option<Value>);
    type IntoIter = indexmap::map::IntoIter<String, Option<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Option<Value>)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<Value>)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}
