//! Configuration options for JCAMP-DX table output.
//!
//! [`JdxOptions`] controls how a block's data table is rendered: how many
//! decimal places every value gets and whether points are written one per
//! line or packed into 80-column lines.
//!
//! ## Examples
//!
//! ```rust
//! use jdx_write::{Block, JdxOptions, Schema};
//!
//! let schema = Schema::simple();
//! let options = JdxOptions::new()
//!     .with_decimal_places(2)
//!     .with_single_column(false);
//!
//! let block = Block::builder(&schema)
//!     .field("title", "Packed")
//!     .table("xypoints", vec![vec![1.0, 2.0], vec![3.0, 4.0]])
//!     .options(options)
//!     .build()
//!     .unwrap();
//!
//! assert!(block.render_full().contains("1.00, 3.00 : 2.00, 4.00"));
//! ```

/// Default number of decimal places for table values.
pub const DEFAULT_DECIMAL_PLACES: usize = 4;

/// Configuration options for rendering a block's data table.
///
/// # Examples
///
/// ```rust
/// use jdx_write::JdxOptions;
///
/// let options = JdxOptions::default();
/// assert_eq!(options.decimal_places, 4);
/// assert!(options.single_column);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JdxOptions {
    pub decimal_places: usize,
    pub single_column: bool,
}

impl Default for JdxOptions {
    fn default() -> Self {
        JdxOptions {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            single_column: true,
        }
    }
}

impl JdxOptions {
    /// Creates default options (4 decimal places, one point per line).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for packed tables, several points per 80-column line.
    ///
    /// Only tuple tables such as `(XY..XY)` support packing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jdx_write::JdxOptions;
    ///
    /// let options = JdxOptions::packed();
    /// assert!(!options.single_column);
    /// ```
    #[must_use]
    pub fn packed() -> Self {
        JdxOptions {
            single_column: false,
            ..Default::default()
        }
    }

    /// Sets the number of decimal places for every table value.
    #[must_use]
    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Sets whether the table is written one point per line.
    #[must_use]
    pub fn with_single_column(mut self, single_column: bool) -> Self {
        self.single_column = single_column;
        self
    }
}
