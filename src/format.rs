//! JCAMP-DX Output Format
//!
//! This module documents the subset of JCAMP-DX 5.01 written by this library.
//! It contains no code.
//!
//! # Labeled Data Records
//!
//! Every record is a DATA-LABEL followed by its DATA-SET:
//!
//! ```text
//! ##TITLE= Some title
//! ##JCAMP-DX= 5.01
//! ##DATA TYPE= INFRARED SPECTRUM
//! ```
//!
//! **Rules**:
//! - The label is written upper case between `##` and `=`, exactly as declared
//!   in the schema (`##YUNITS=`, `##$MY CUSTOM RECORD=`)
//! - One space separates `=` from the value; a record without a value is just
//!   `##LABEL=`
//! - Numbers are written in AFFN without scaling: integers as integers, floats
//!   in their shortest form (`1`, `2.5`)
//! - Lines are word wrapped at 80 columns. Words are never split, so a word
//!   longer than a line gets a line of its own
//! - An inline comment is appended to the first line as `  $$ comment`
//! - The record declared with an empty label renders as `##=`, the free
//!   comment record
//!
//! ## Which Records Are Written
//!
//! Without an explicit output list, a block writes every required record plus
//! every optional record with a non-empty value, in schema order with `title`
//! first. Empty text counts as no value; the number `0` does not.
//!
//! With an explicit list, exactly the listed records are written in list order.
//! The list must start with `title` and contain every required record.
//!
//! # Data Tables
//!
//! The table record follows the last data record. Its header names the shape:
//!
//! | Shape | Header | Data line |
//! |-------|--------|-----------|
//! | Sequential | `##XYDATA= (X++(Y..Y))` | `1.0000 4.0000` |
//! | Tuple | `##XYPOINTS= (XY..XY)` | `1.0000, 4.0000` |
//!
//! Values are fixed-point with four decimal places by default
//! ([`JdxOptions::decimal_places`](crate::JdxOptions)).
//!
//! ## Packed Tuple Tables
//!
//! With `single_column` off, points of a tuple table share lines:
//!
//! ```text
//! ##XYPOINTS= (XY..XY)
//!   1.0000, -2.5000 : 100.0000,  3.0000
//! ```
//!
//! - Every dimension is right-justified to its widest formatted value
//! - Points are joined with ` : `
//! - A new line starts before a point that would push the line past 80 columns
//!
//! Sequential tables are always written one point per line.
//!
//! ## Previews
//!
//! Preview rendering keeps the header, the first data line, a `$$etc...`
//! marker and the last data line when a table has more than three data lines.
//!
//! # Blocks
//!
//! A block is its records, its table and `##END=`, joined by single newlines.
//! No newline follows `##END=`.
//!
//! ```text
//! ##TITLE= Some title
//! ##JCAMP-DX= 5.01
//! ...
//! ##XYPOINTS= (XY..XY)
//! 1.0000, 4.0000
//! ##END=
//! ```
//!
//! `##JCAMP-DX=` is always `5.01`. `##XFACTOR=` and `##YFACTOR=` are always `1`.
//! `##FIRSTX=`, `##LASTX=` and `##NPOINTS=` come from the first dimension of
//! the table unless given explicitly.
//!
//! # Compound Documents
//!
//! A `LINK` header, every block, and a final `##END=`, separated by blank lines:
//!
//! ```text
//! ##TITLE= test
//! ##JCAMP-DX= 5.01
//! ##DATA TYPE= LINK
//! ##BLOCKS= 2
//!
//! <block 1>
//!
//! <block 2>
//!
//! ##END=
//! ```
//!
//! # Not Supported
//!
//! - ASDF compression of tables
//! - `##XFACTOR=` / `##YFACTOR=` other than `1`
//! - Reading JCAMP-DX files
