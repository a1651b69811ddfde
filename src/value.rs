//! Values held by labeled data records.
//!
//! A record's DATA-SET is either free text, a number, or a timestamp. The
//! timestamp variant only exists on the way in: date records normalize it to
//! the `YYYY/MM/DD HH:MM:SS.ffffff±ZZZZ` text form when it is assigned.
//!
//! ```rust
//! use jdx_write::{Number, Value};
//!
//! assert_eq!(Value::from("IR").to_string(), "IR");
//! assert_eq!(Value::from(3).to_string(), "3");
//! assert_eq!(Value::from(1.0).to_string(), "1");
//! assert_eq!(Value::from(2.5), Value::Number(Number::Float(2.5)));
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// `strftime` pattern used for timestamps assigned to date records.
pub const LONG_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f%z";

/// A DATA-SET value of a labeled data record.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(Number),
    DateTime(DateTime<FixedOffset>),
}

/// A numeric DATA-SET, written in AFFN without scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<usize> for Number {
    /// Counts beyond `i64::MAX` fall back to a float.
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Number::Float(value as f64), Number::Integer)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns `true` for an empty text value.
    ///
    /// Numbers are never empty, so a zero-valued optional record is still
    /// written out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(i)) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::DateTime(dt) => write!(f, "{}", dt.format(LONG_DATE_FORMAT)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_numbers() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(1.25).to_string(), "1.25");
        assert_eq!(Value::from(3usize).to_string(), "3");
    }

    #[test]
    fn test_large_usize_does_not_wrap() {
        let n = Number::from(usize::MAX);
        assert!(matches!(n, Number::Float(_)));
        assert!(n.as_f64() > 0.0);
        assert_eq!(Value::from(i64::MAX as usize).as_i64(), Some(i64::MAX));
    }

    #[test]
    fn test_display_datetime() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            Value::from(dt).to_string(),
            "2021/03/04 05:06:07.000000+0200"
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(Value::from("").is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(0).is_empty());
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Value::from("IR")).unwrap(), "\"IR\"");
        assert_eq!(serde_json::to_string(&Value::from(3)).unwrap(), "3");
    }
}
