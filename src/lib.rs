//! # jdx_write
//!
//! A writer for JCAMP-DX 5.01 spectroscopic data files.
//!
//! ## What is JCAMP-DX?
//!
//! JCAMP-DX is a plain-text exchange format for spectra. A file is a sequence
//! of labeled data records (LDRs) of the form `##LABEL= value`, one tabular
//! record holding the numeric data, and a closing `##END=`. Several blocks can
//! be bundled into one compound (`LINK`) document.
//!
//! ## Key Features
//!
//! - **Schemas**: the full JCAMP-DX 5.01 record list, extensible with custom records
//! - **Soft validation**: required records, allowed values and date formats are
//!   reported, never enforced, so incomplete documents can still be written
//! - **Hard errors**: structural mistakes (unknown names, wrong matrix shape,
//!   unsupported compression) fail at construction time
//! - **AFFN tables**: one point per line or packed into 80-column lines
//!
//! ## Quick Start
//!
//! ```rust
//! use jdx_write::{Block, Schema};
//!
//! let schema = Schema::simple();
//! let block = Block::builder(&schema)
//!     .field("title", "Some title")
//!     .field("data_type", "IR")
//!     .field("xunits", "l/CM")
//!     .field("origin", "My origin")
//!     .field("owner", "Me")
//!     .table("xypoints", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
//!     .build()
//!     .unwrap();
//!
//! // `YUNITS` is missing and `IR` is not an allowed `DATA TYPE`: both are
//! // reported by the validation, the document is written anyway.
//! let report = block.validate();
//! assert_eq!(report.len(), 2);
//!
//! let text = jdx_write::to_string(&block);
//! assert!(text.starts_with("##TITLE= Some title\n##JCAMP-DX= 5.01\n"));
//! assert!(text.ends_with("3.0000, 6.0000\n##END="));
//! ```
//!
//! ### Compound Documents
//!
//! ```rust
//! use jdx_write::{Block, CompoundDocument, Schema};
//!
//! let schema = Schema::simple();
//! let blocks = ["first", "second"]
//!     .into_iter()
//!     .map(|title| {
//!         Block::builder(&schema)
//!             .field("title", title)
//!             .table("xypoints", vec![vec![1.0], vec![2.0]])
//!             .build()
//!     })
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let document = CompoundDocument::with_blocks("test", blocks).unwrap();
//! assert!(jdx_write::to_string(&document).contains("##BLOCKS= 2"));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: a `warn!` with the pretty JSON
//! validation report whenever [`to_string`] writes an invalid document, and
//! `debug!` records while blocks are assembled. Install any logger (for
//! instance `env_logger`) to see them.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the exact output layout.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - One infrared spectrum block written to stdout
//! - **`compound.rs`** - A LINK document with two blocks and a custom record
//!
//! Run any example with: `cargo run --example <name>`

pub mod block;
pub mod compound;
pub mod error;
pub mod format;
pub mod map;
pub mod options;
pub mod record;
pub mod report;
pub mod rules;
pub mod schema;
pub mod table;
pub mod value;

pub use block::{Block, BlockBuilder, RecordSet};
pub use compound::CompoundDocument;
pub use error::{Error, Result};
pub use map::ValueMap;
pub use options::JdxOptions;
pub use record::{Field, FieldFormat, FieldSpec};
pub use report::ValidationReport;
pub use rules::{Rule, RuleFn};
pub use schema::Schema;
pub use table::{Compression, TableShape, TableSpec};
pub use value::{Number, Value};

use std::fs::File;
use std::io;
use std::path::Path;

/// A writable JCAMP-DX document: a single [`Block`] or a [`CompoundDocument`].
pub trait Render {
    /// Collects soft validation problems, keyed by record name.
    fn validate(&self) -> ValidationReport;

    /// Complete document text, without a trailing newline.
    fn render_full(&self) -> String;

    /// Abbreviated document text with shortened tables.
    fn render_preview(&self) -> String;
}

/// Renders a document after validating it.
///
/// Validation problems never stop the output; when there are any, the report
/// is logged as a warning in pretty-printed JSON.
///
/// # Examples
///
/// ```rust
/// use jdx_write::{Block, Schema};
///
/// let schema = Schema::simple();
/// let block = Block::builder(&schema)
///     .field("title", "t")
///     .table("xydata", vec![vec![1.0, 2.0], vec![3.0, 4.0]])
///     .build()
///     .unwrap();
///
/// let text = jdx_write::to_string(&block);
/// assert!(text.contains("##XYDATA= (X++(Y..Y))\n1.0000 3.0000\n2.0000 4.0000\n##END="));
/// ```
#[must_use]
pub fn to_string<D>(document: &D) -> String
where
    D: ?Sized + Render,
{
    let report = document.validate();
    if !report.is_valid() {
        log::warn!("document failed validation:\n{}", report.to_json());
    }
    document.render_full()
}

/// Renders a document without validating it.
#[must_use]
pub fn to_string_unchecked<D>(document: &D) -> String
where
    D: ?Sized + Render,
{
    document.render_full()
}

/// Writes a validated document to `writer`.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W, D>(mut writer: W, document: &D) -> Result<()>
where
    W: io::Write,
    D: ?Sized + Render,
{
    writer.write_all(to_string(document).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a validated document to a new file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn to_file<P, D>(path: P, document: &D) -> Result<()>
where
    P: AsRef<Path>,
    D: ?Sized + Render,
{
    let file = File::create(path)?;
    to_writer(io::BufWriter::new(file), document)
}
