//! Error types for JCAMP-DX document construction and output.
//!
//! Every variant here is a *hard* error: it aborts construction of a block or
//! document immediately. Validation problems with record values are *soft*
//! errors and never show up as an [`Error`]; they are collected into a
//! [`ValidationReport`](crate::ValidationReport) instead.
//!
//! ## Error Categories
//!
//! - **Schema errors**: unknown field names, invalid explicit output lists
//! - **Table errors**: missing or duplicate tables, mismatched matrix shapes,
//!   unparseable format tokens
//! - **Unsupported features**: ASDF compression, custom scaling factors,
//!   packed sequential tables
//! - **I/O errors**: file writing failures
//!
//! ## Examples
//!
//! ```rust
//! use jdx_write::{Block, Error, Schema};
//!
//! let schema = Schema::simple();
//! let result = Block::builder(&schema)
//!     .field("title", "Spectrum")
//!     .build();
//!
//! assert!(matches!(result, Err(Error::MissingTable)));
//! ```

use thiserror::Error;

/// Represents all hard errors that can occur while building or writing a JCAMP-DX document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// A field or table name that the schema does not define
    #[error("Unexpected data label '{0}'")]
    UnknownField(String),

    /// A schema without a `title` record
    #[error("'title' is not presented in the list of data records of the schema")]
    MissingTitle,

    /// More than one table payload supplied to a block
    #[error("Only one data table record is allowed, got '{first}' and '{second}'")]
    DuplicateTable { first: String, second: String },

    /// No table payload supplied to a block
    #[error("No actual data is provided")]
    MissingTable,

    /// Matrix does not match the declared table dimensions
    #[error("Invalid data shape for '{label}': {msg}")]
    ShapeMismatch { label: String, msg: String },

    /// Table format token that matches neither shape grammar
    #[error("Unexpected data format '{token}'. The format must be like '{expected}'")]
    InvalidFormat { token: String, expected: String },

    /// Explicit output field list that breaks the schema rules
    #[error("Invalid output data records: {0}")]
    InvalidOutputFields(String),

    /// Value of the wrong shape supplied to a record
    #[error("Invalid value for DATA-LABEL '##{label}=': {msg}")]
    InvalidValue { label: String, msg: String },

    /// Feature that this writer deliberately does not implement
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

impl Error {
    /// Creates an unknown field error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jdx_write::Error;
    ///
    /// let err = Error::unknown_field("colour");
    /// assert!(err.to_string().contains("colour"));
    /// ```
    pub fn unknown_field(name: &str) -> Self {
        Error::UnknownField(name.to_string())
    }

    /// Creates a duplicate table error naming both table payloads.
    pub fn duplicate_table(first: &str, second: &str) -> Self {
        Error::DuplicateTable {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Creates a shape mismatch error for the table with the given label.
    pub fn shape_mismatch(label: &str, msg: &str) -> Self {
        Error::ShapeMismatch {
            label: label.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid format token error with the expected token form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jdx_write::Error;
    ///
    /// let err = Error::invalid_format("(XY)", "(XY..XY)");
    /// assert!(err.to_string().contains("(XY..XY)"));
    /// ```
    pub fn invalid_format(token: &str, expected: &str) -> Self {
        Error::InvalidFormat {
            token: token.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates an invalid output fields error.
    pub fn invalid_output_fields(msg: &str) -> Self {
        Error::InvalidOutputFields(msg.to_string())
    }

    /// Creates an invalid value error for the record with the given label.
    pub fn invalid_value(label: &str, msg: &str) -> Self {
        Error::InvalidValue {
            label: label.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported feature error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jdx_write::Error;
    ///
    /// let err = Error::unsupported("ASDF compression");
    /// assert_eq!(err.to_string(), "Unsupported feature: ASDF compression");
    /// ```
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates an I/O error for file writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
