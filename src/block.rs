//! Block assembly: records plus one data table.
//!
//! [`RecordSet`] owns the record instances cloned from a [`Schema`] and
//! decides which of them are written. [`Block`] adds exactly one
//! [`TableSpec`] and the `##END=` terminator. Blocks are created through
//! [`BlockBuilder`], which reports every construction problem as a hard
//! [`Error`]:
//!
//! ```rust
//! use jdx_write::{Block, Error, Schema};
//!
//! let schema = Schema::simple();
//!
//! let block = Block::builder(&schema)
//!     .field("title", "Some title")
//!     .field("data_type", "INFRARED SPECTRUM")
//!     .table("xypoints", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
//!     .build()
//!     .unwrap();
//! assert_eq!(block.value("npoints").and_then(|v| v.as_i64()), Some(3));
//!
//! let err = Block::builder(&schema)
//!     .field("title", "Some title")
//!     .field("xfactor", 2)
//!     .table("xypoints", vec![vec![1.0], vec![4.0]])
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, Error::Unsupported(_)));
//! ```

use crate::schema::{JCAMP_DX_VERSION, TITLE};
use crate::{
    Error, Field, JdxOptions, Render, Result, Schema, TableSpec, ValidationReport, Value, ValueMap,
};
use indexmap::IndexMap;
use std::fmt;

/// Document terminator line.
pub const END_MARKER: &str = "##END=";

const SCALING_FACTORS: [&str; 2] = ["xfactor", "yfactor"];

/// Ordered record instances of one block or document header.
#[derive(Clone, Debug)]
pub struct RecordSet {
    fields: IndexMap<String, Field>,
    output_fields: Option<Vec<String>>,
}

impl RecordSet {
    /// Instantiates every record template of `schema`, `title` first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTitle`] when the schema has no `title` record.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let mut fields = IndexMap::new();
        for name in schema.field_names()? {
            if let Some(spec) = schema.field(&name) {
                fields.insert(name, spec.instantiate());
            }
        }
        Ok(RecordSet {
            fields,
            output_fields: None,
        })
    }

    /// Restricts output to an explicit list of records.
    ///
    /// # Errors
    ///
    /// Fails unless every name is a known record, every required record is
    /// listed and the list starts with `title`.
    pub fn set_output_fields(&mut self, names: Vec<String>) -> Result<()> {
        if let Some(unknown) = names.iter().find(|name| !self.fields.contains_key(*name)) {
            return Err(Error::invalid_output_fields(&format!(
                "data record '{}' was not defined",
                unknown
            )));
        }
        if let Some((missing, _)) = self
            .fields
            .iter()
            .find(|(name, field)| field.is_required() && !names.contains(name))
        {
            return Err(Error::invalid_output_fields(&format!(
                "data record '{}' is required but not included",
                missing
            )));
        }
        if names.first().map(String::as_str) != Some(TITLE) {
            return Err(Error::invalid_output_fields(
                "first output data record must be 'title'",
            ));
        }
        self.output_fields = Some(names);
        Ok(())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Record names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Assigns a record value.
    ///
    /// # Errors
    ///
    /// Fails for unknown record names or values the record rejects.
    pub fn set_value<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| Error::unknown_field(name))?
            .set_value(value)
    }

    fn set_if_declared<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(field) => field.set_value(value),
            None => Ok(()),
        }
    }

    /// Sets or clears the inline comment of a record.
    ///
    /// # Errors
    ///
    /// Fails for unknown record names.
    pub fn set_comment(&mut self, name: &str, comment: Option<&str>) -> Result<()> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| Error::unknown_field(name))?
            .set_comment(comment);
        Ok(())
    }

    /// Snapshot of all record values, used as validation context.
    #[must_use]
    pub fn values(&self) -> ValueMap {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value().cloned()))
            .collect()
    }

    /// Names of the records that are written.
    ///
    /// The explicit list when one was set; otherwise every required record
    /// plus every record with a non-empty value.
    #[must_use]
    pub fn output_names(&self) -> Vec<&str> {
        match &self.output_fields {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => self
                .fields
                .iter()
                .filter(|(_, field)| field.is_required() || field.has_value())
                .map(|(name, _)| name.as_str())
                .collect(),
        }
    }

    /// Validates every output record against the full sibling values.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let values = self.values();
        let mut report = ValidationReport::new();
        for name in self.output_names() {
            if let Some(field) = self.fields.get(name) {
                report.insert(name, field.validate(&values));
            }
        }
        report
    }

    /// Output records, one after another.
    #[must_use]
    pub fn render(&self) -> String {
        self.output_names()
            .into_iter()
            .filter_map(|name| self.fields.get(name))
            .map(Field::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One self-contained JCAMP-DX block: records, one table, `##END=`.
#[derive(Clone, Debug)]
pub struct Block {
    records: RecordSet,
    table_name: String,
    table: TableSpec,
}

impl Block {
    /// Starts building a block from `schema`.
    #[must_use]
    pub fn builder(schema: &Schema) -> BlockBuilder<'_> {
        BlockBuilder::new(schema)
    }

    #[must_use]
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.records.field(name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.records.field(name).and_then(Field::value)
    }

    #[must_use]
    pub fn values(&self) -> ValueMap {
        self.records.values()
    }

    /// Changes a record value after construction.
    ///
    /// # Errors
    ///
    /// Fails for unknown records, rejected values and scaling factors.
    pub fn set_value<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        if SCALING_FACTORS.contains(&name) {
            return Err(Error::unsupported("custom X/Y factors are not available yet"));
        }
        self.records.set_value(name, value)
    }

    /// Sets or clears the inline comment of a record.
    ///
    /// # Errors
    ///
    /// Fails for unknown record names.
    pub fn set_comment(&mut self, name: &str, comment: Option<&str>) -> Result<()> {
        self.records.set_comment(name, comment)
    }

    /// Schema name of the table payload, e.g. `xypoints`.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn table(&self) -> &TableSpec {
        &self.table
    }

    /// Switches the table between one point per line and packed lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] for packed sequential tables.
    pub fn set_single_column(&mut self, single_column: bool) -> Result<()> {
        self.table.set_single_column(single_column)
    }

    pub fn set_decimal_places(&mut self, decimal_places: usize) {
        self.table.set_decimal_places(decimal_places);
    }

    pub fn set_table_comment(&mut self, comment: Option<&str>) {
        self.table.set_comment(comment);
    }

    /// Validates all output records plus the presence of table data.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = self.records.validate();
        if self.table.data().is_none() {
            report.insert(&self.table_name, vec!["No data provided".to_string()]);
        }
        report
    }

    /// Document text with every table line.
    #[must_use]
    pub fn render_full(&self) -> String {
        [
            self.records.render(),
            self.table.render_full(),
            END_MARKER.to_string(),
        ]
        .join("\n")
    }

    /// Short text for display, with the table abbreviated.
    #[must_use]
    pub fn render_preview(&self) -> String {
        [
            self.records.render(),
            self.table.render_preview(),
            END_MARKER.to_string(),
        ]
        .join("\n")
    }
}

impl Render for Block {
    fn validate(&self) -> ValidationReport {
        Block::validate(self)
    }

    fn render_full(&self) -> String {
        Block::render_full(self)
    }

    fn render_preview(&self) -> String {
        Block::render_preview(self)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_full())
    }
}

/// Collects record values and the table payload of a new [`Block`].
///
/// Nothing is checked until [`BlockBuilder::build`].
#[derive(Debug)]
pub struct BlockBuilder<'a> {
    schema: &'a Schema,
    values: Vec<(String, Value)>,
    tables: Vec<(String, Vec<Vec<f64>>)>,
    options: JdxOptions,
    output_fields: Option<Vec<String>>,
}

impl<'a> BlockBuilder<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        BlockBuilder {
            schema,
            values: Vec::new(),
            tables: Vec::new(),
            options: JdxOptions::default(),
            output_fields: None,
        }
    }

    /// Sets a record value by schema name, e.g. `"title"` or `"xunits"`.
    #[must_use]
    pub fn field<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.values.push((name.to_string(), value.into()));
        self
    }

    /// Supplies the table payload by schema name, one sequence per dimension.
    #[must_use]
    pub fn table(mut self, name: &str, data: Vec<Vec<f64>>) -> Self {
        self.tables.push((name.to_string(), data));
        self
    }

    #[must_use]
    pub fn options(mut self, options: JdxOptions) -> Self {
        self.options = options;
        self
    }

    /// Writes exactly these records, in this order.
    #[must_use]
    pub fn output_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Creates the block.
    ///
    /// # Errors
    ///
    /// Returns a hard error for unknown names, zero or several tables, a
    /// mismatched matrix shape, custom scaling factors, packed sequential
    /// tables, rejected values and invalid explicit output lists.
    pub fn build(self) -> Result<Block> {
        let mut records = RecordSet::from_schema(self.schema)?;
        if let Some(names) = self.output_fields {
            records.set_output_fields(names)?;
        }

        for (name, value) in self.values {
            if SCALING_FACTORS.contains(&name.as_str()) {
                return Err(Error::unsupported("custom X/Y factors are not available yet"));
            }
            records.set_value(&name, value)?;
        }
        records.set_if_declared("jcamp_dx", JCAMP_DX_VERSION)?;

        let mut tables = self.tables.into_iter();
        let (table_name, data) = tables.next().ok_or(Error::MissingTable)?;
        if let Some((second, _)) = tables.next() {
            return Err(Error::duplicate_table(&table_name, &second));
        }
        let mut table = self
            .schema
            .table(&table_name)
            .cloned()
            .ok_or_else(|| Error::unknown_field(&table_name))?;
        table.set_data(data)?;
        table.set_decimal_places(self.options.decimal_places);
        table.set_single_column(self.options.single_column)?;

        derive_abscissa_records(&mut records, &table)?;
        for name in SCALING_FACTORS {
            records.set_if_declared(name, 1)?;
        }

        log::debug!(
            "built block with table '{}' ({} points)",
            table_name,
            table.npoints()
        );
        Ok(Block {
            records,
            table_name,
            table,
        })
    }
}

/// Fills FIRSTX, LASTX and NPOINTS from the first dimension unless already set.
fn derive_abscissa_records(records: &mut RecordSet, table: &TableSpec) -> Result<()> {
    let abscissa = table.data().and_then(|data| data.first());
    let first = abscissa.and_then(|x| x.first()).copied();
    let last = abscissa.and_then(|x| x.last()).copied();
    let npoints = table.npoints();

    let unset = |records: &RecordSet, name: &str| {
        records.field(name).is_some_and(|f| f.value().is_none())
    };
    if let (true, Some(first)) = (unset(records, "firstx"), first) {
        records.set_value("firstx", first)?;
    }
    if let (true, Some(last)) = (unset(records, "lastx"), last) {
        records.set_value("lastx", last)?;
    }
    if unset(records, "npoints") {
        records.set_value("npoints", npoints)?;
    }
    Ok(())
}
