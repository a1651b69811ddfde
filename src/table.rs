//! Tabular spectral data records.
//!
//! A [`TableSpec`] holds the numeric matrix of a block (one sequence per
//! declared dimension) and renders it in AFFN, the uncompressed ASCII form.
//! Two table shapes exist:
//!
//! | Shape | Token | Single column | Packed |
//! |-------|-------|---------------|--------|
//! | Sequential | `(X++(Y..Y))` | `x y` per line | unsupported |
//! | Tuple | `(XY..XY)` | `x, y` per line | `x, y : x, y : ...` up to 80 columns |
//!
//! ```rust
//! use jdx_write::TableSpec;
//!
//! let mut table = TableSpec::xypoints();
//! table.set_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!(
//!     table.render_full(),
//!     "##XYPOINTS= (XY..XY)\n1.0000, 4.0000\n2.0000, 5.0000\n3.0000, 6.0000"
//! );
//!
//! table.set_single_column(false).unwrap();
//! assert_eq!(
//!     table.render_full(),
//!     "##XYPOINTS= (XY..XY)\n1.0000, 4.0000 : 2.0000, 5.0000 : 3.0000, 6.0000"
//! );
//! ```

use crate::options::DEFAULT_DECIMAL_PLACES;
use crate::record::MAX_LINE_WIDTH;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Marker line that replaces the middle of a table in previews.
pub const PREVIEW_MARKER: &str = "$$etc...";

const VALUE_SEPARATOR: &str = ", ";
const POINT_SEPARATOR: &str = " : ";

/// Numeric encoding of table values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    /// ASCII free format numeric.
    #[default]
    Affn,
    /// ASCII squeezed difference form; not supported by this writer.
    Asdf,
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AFFN" => Ok(Compression::Affn),
            "ASDF" => Ok(Compression::Asdf),
            other => Err(Error::unsupported(&format!("compression '{}'", other))),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::Affn => f.write_str("AFFN"),
            Compression::Asdf => f.write_str("ASDF"),
        }
    }
}

/// Layout grammar of a table, parsed from its format token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableShape {
    /// `(X++(Y..Y))`: abscissa followed by a run of ordinates.
    Sequential { abscissa: char, ordinate: char },
    /// `(XY..XY)`: interleaved values of two or more dimensions per point.
    Tuple { dimensions: Vec<char> },
}

fn sequential_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\(([A-Z])\+\+\(([A-Z])\.\.([A-Z])\)\)$").unwrap())
}

fn tuple_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\(([A-Z]{2,})\.\.([A-Z]{2,})\)$").unwrap())
}

impl TableShape {
    /// Parses a sequential token such as `(X++(Y..Y))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for any other token.
    pub fn parse_sequential(token: &str) -> Result<Self> {
        let invalid = || Error::invalid_format(token, "(X++(Y..Y))");
        let caps = sequential_pattern().captures(token).ok_or_else(invalid)?;
        let letter = |i: usize| caps.get(i).and_then(|m| m.as_str().chars().next());
        match (letter(1), letter(2), letter(3)) {
            (Some(abscissa), Some(ordinate), Some(repeat)) if ordinate == repeat => {
                Ok(TableShape::Sequential { abscissa, ordinate })
            }
            _ => Err(invalid()),
        }
    }

    /// Parses a tuple token such as `(XY..XY)` or `(XYM..XYM)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for any other token.
    pub fn parse_tuple(token: &str) -> Result<Self> {
        let invalid = || Error::invalid_format(token, "(XY..XY)");
        let caps = tuple_pattern().captures(token).ok_or_else(invalid)?;
        match (caps.get(1), caps.get(2)) {
            (Some(first), Some(repeat)) if first.as_str() == repeat.as_str() => {
                Ok(TableShape::Tuple {
                    dimensions: first.as_str().chars().collect(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Dimension letters in data order.
    #[must_use]
    pub fn dimensions(&self) -> Vec<char> {
        match self {
            TableShape::Sequential { abscissa, ordinate } => vec![*abscissa, *ordinate],
            TableShape::Tuple { dimensions } => dimensions.clone(),
        }
    }

    #[must_use]
    pub fn is_sequential(&self) -> bool {
        matches!(self, TableShape::Sequential { .. })
    }
}

impl FromStr for TableShape {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        Self::parse_sequential(token).or_else(|_| Self::parse_tuple(token))
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableShape::Sequential { abscissa, ordinate } => {
                write!(f, "({}++({}..{}))", abscissa, ordinate, ordinate)
            }
            TableShape::Tuple { dimensions } => {
                let letters: String = dimensions.iter().collect();
                write!(f, "({}..{})", letters, letters)
            }
        }
    }
}

/// A tabular data record and its matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    label: String,
    shape: TableShape,
    compression: Compression,
    decimal_places: usize,
    comment: Option<String>,
    single_column: bool,
    data: Option<Vec<Vec<f64>>>,
}

impl TableSpec {
    fn with_shape(label: &str, shape: TableShape) -> Self {
        TableSpec {
            label: label.to_string(),
            shape,
            compression: Compression::Affn,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            comment: None,
            single_column: true,
            data: None,
        }
    }

    /// A table with a sequential shape token.
    ///
    /// # Errors
    ///
    /// Fails on a non-sequential token or any compression other than AFFN.
    pub fn sequential(label: &str, token: &str, compression: Compression) -> Result<Self> {
        let shape = TableShape::parse_sequential(token)?;
        if compression != Compression::Affn {
            return Err(Error::unsupported(
                "only AFFN (i.e. no compression) is available",
            ));
        }
        Ok(Self::with_shape(label, shape))
    }

    /// A table with a tuple shape token.
    ///
    /// # Errors
    ///
    /// Fails on a non-tuple token.
    pub fn tuple(label: &str, token: &str) -> Result<Self> {
        Ok(Self::with_shape(label, TableShape::parse_tuple(token)?))
    }

    /// `##XYDATA= (X++(Y..Y))`
    #[must_use]
    pub fn xydata() -> Self {
        Self::with_shape(
            "XYDATA",
            TableShape::Sequential {
                abscissa: 'X',
                ordinate: 'Y',
            },
        )
    }

    /// `##XYPOINTS= (XY..XY)`
    #[must_use]
    pub fn xypoints() -> Self {
        Self::with_shape(
            "XYPOINTS",
            TableShape::Tuple {
                dimensions: vec!['X', 'Y'],
            },
        )
    }

    /// `##PEAK TABLE= (XY..XY)`
    #[must_use]
    pub fn peak_table() -> Self {
        Self::with_shape(
            "PEAK TABLE",
            TableShape::Tuple {
                dimensions: vec!['X', 'Y'],
            },
        )
    }

    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn shape(&self) -> &TableShape {
        &self.shape
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    #[must_use]
    pub fn ndimensions(&self) -> usize {
        self.shape.dimensions().len()
    }

    #[must_use]
    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn set_decimal_places(&mut self, decimal_places: usize) {
        self.decimal_places = decimal_places;
    }

    #[must_use]
    pub fn is_single_column(&self) -> bool {
        self.single_column
    }

    /// Switches between one point per line and packed lines.
    ///
    /// # Errors
    ///
    /// Packed output is only implemented for tuple tables; asking for it on a
    /// sequential table returns [`Error::Unsupported`].
    pub fn set_single_column(&mut self, single_column: bool) -> Result<()> {
        if !single_column && self.shape.is_sequential() {
            return Err(Error::unsupported(&format!(
                "packed output for sequential table '{}'",
                self.label
            )));
        }
        self.single_column = single_column;
        Ok(())
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<&str>) {
        self.comment = comment.map(str::to_string);
    }

    #[must_use]
    pub fn data(&self) -> Option<&[Vec<f64>]> {
        self.data.as_deref()
    }

    /// Number of points, i.e. the length of every dimension sequence.
    #[must_use]
    pub fn npoints(&self) -> usize {
        self.data
            .as_ref()
            .and_then(|data| data.first())
            .map_or(0, Vec::len)
    }

    /// Stores the matrix, one sequence per dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the number of sequences differs
    /// from the number of dimensions or the sequences differ in length.
    pub fn set_data(&mut self, data: Vec<Vec<f64>>) -> Result<()> {
        let ndimensions = self.ndimensions();
        if data.len() != ndimensions {
            return Err(Error::shape_mismatch(
                &self.label,
                &format!("the data must be a list of {} lists", ndimensions),
            ));
        }
        let npoints = data[0].len();
        if data.iter().any(|column| column.len() != npoints) {
            return Err(Error::shape_mismatch(
                &self.label,
                "the sub-lists of the data have different size",
            ));
        }
        self.data = Some(data);
        Ok(())
    }

    /// `##<LABEL>= <token>` with the optional inline comment.
    #[must_use]
    pub fn header_line(&self) -> String {
        match &self.comment {
            Some(comment) => format!("##{}= {}  $$ {}", self.label, self.shape, comment),
            None => format!("##{}= {}", self.label, self.shape),
        }
    }

    /// Formatted data lines, without the header.
    #[must_use]
    pub fn data_lines(&self) -> Vec<String> {
        let Some(data) = &self.data else {
            return Vec::new();
        };
        let separator = match self.shape {
            TableShape::Sequential { .. } => " ",
            TableShape::Tuple { .. } => VALUE_SEPARATOR,
        };
        if self.single_column {
            single_column_lines(data, self.decimal_places, separator)
        } else {
            packed_lines(data, self.decimal_places)
        }
    }

    /// Header plus every data line.
    #[must_use]
    pub fn render_full(&self) -> String {
        let mut lines = vec![self.header_line()];
        lines.extend(self.data_lines());
        lines.join("\n")
    }

    /// Header, first line, [`PREVIEW_MARKER`] and last line when the table has
    /// more than three data lines; the full text otherwise.
    #[must_use]
    pub fn render_preview(&self) -> String {
        let lines = self.data_lines();
        match (lines.first(), lines.last()) {
            (Some(first), Some(last)) if lines.len() > 3 => [
                self.header_line().as_str(),
                first.as_str(),
                PREVIEW_MARKER,
                last.as_str(),
            ]
            .join("\n"),
            _ => self.render_full(),
        }
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_full())
    }
}

#[inline]
fn format_value(value: f64, decimal_places: usize) -> String {
    format!("{:.*}", decimal_places, value)
}

fn single_column_lines(data: &[Vec<f64>], decimal_places: usize, separator: &str) -> Vec<String> {
    (0..data[0].len())
        .map(|i| {
            data.iter()
                .map(|column| format_value(column[i], decimal_places))
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect()
}

fn packed_lines(data: &[Vec<f64>], decimal_places: usize) -> Vec<String> {
    // Right-justify every dimension to its widest value.
    let columns: Vec<Vec<String>> = data
        .iter()
        .map(|column| {
            let formatted: Vec<String> = column
                .iter()
                .map(|&x| format_value(x, decimal_places))
                .collect();
            let width = formatted.iter().map(String::len).max().unwrap_or(0);
            formatted
                .into_iter()
                .map(|s| format!("{:>width$}", s, width = width))
                .collect()
        })
        .collect();

    let groups = (0..data[0].len()).map(|i| {
        columns
            .iter()
            .map(|column| column[i].as_str())
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR)
    });

    let mut lines = Vec::new();
    let mut current = String::new();
    for group in groups {
        if current.is_empty() {
            current = group;
        } else if current.len() + POINT_SEPARATOR.len() + group.len() > MAX_LINE_WIDTH {
            lines.push(std::mem::replace(&mut current, group));
        } else {
            current.push_str(POINT_SEPARATOR);
            current.push_str(&group);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
