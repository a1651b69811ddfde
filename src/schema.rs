//! Document schemas: the ordered record and table templates of a block.
//!
//! A [`Schema`] is built once and never mutated by the blocks created from
//! it. [`Schema::simple`] describes a single JCAMP-DX 5.01 block;
//! [`Schema::link`] describes the header of a compound (`LINK`) document.
//! Custom records are added with [`Schema::with_field`]:
//!
//! ```rust
//! use jdx_write::{FieldSpec, Schema};
//!
//! let schema = Schema::simple()
//!     .with_field("my_custom_record", FieldSpec::string("$MY CUSTOM RECORD").required());
//!
//! let names = schema.field_names().unwrap();
//! assert_eq!(names.first().map(String::as_str), Some("title"));
//! assert_eq!(names.last().map(String::as_str), Some("my_custom_record"));
//! ```

use crate::{Error, FieldSpec, Result, TableSpec};
use indexmap::IndexMap;

/// Name of the record every schema must declare.
pub const TITLE: &str = "title";

/// Version written to `##JCAMP-DX=`.
pub const JCAMP_DX_VERSION: &str = "5.01";

/// `##DATA TYPE=` of a compound document header.
pub const LINK_DATA_TYPE: &str = "LINK";

/// Ordered record and table templates.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
    tables: IndexMap<String, TableSpec>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a record template under `name`.
    #[must_use]
    pub fn with_field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.insert(name.to_string(), spec);
        self
    }

    /// Adds (or replaces) a table template under `name`.
    #[must_use]
    pub fn with_table(mut self, name: &str, table: TableSpec) -> Self {
        self.tables.insert(name.to_string(), table);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.get(name)
    }

    /// Record names in output order.
    ///
    /// Declaration order, except that records declared before `title` are
    /// moved after the rest so that `title` always comes first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTitle`] when the schema has no `title` record.
    pub fn field_names(&self) -> Result<Vec<String>> {
        let start = self.fields.get_index_of(TITLE).ok_or(Error::MissingTitle)?;
        let mut names: Vec<String> = self.fields.keys().cloned().collect();
        names.rotate_left(start);
        Ok(names)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterates over record templates in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Header records of a compound document.
    #[must_use]
    pub fn link() -> Self {
        Schema::new()
            .with_field(TITLE, FieldSpec::text("TITLE").required())
            .with_field(
                "jcamp_dx",
                FieldSpec::string("JCAMP-DX")
                    .choices([JCAMP_DX_VERSION])
                    .required(),
            )
            .with_field(
                "data_type",
                FieldSpec::string("DATA TYPE")
                    .choices([LINK_DATA_TYPE])
                    .required(),
            )
            .with_field("block_count", FieldSpec::affn("BLOCKS").required())
    }

    /// Records and tables of a single JCAMP-DX 5.01 block.
    #[must_use]
    pub fn simple() -> Self {
        Schema::new()
            // header
            .with_field(
                TITLE,
                FieldSpec::text("TITLE").required().description(
                    "Should contain a concise description of the spectrum, suitable as a title for a plotted spectrum.",
                ),
            )
            .with_field(
                "jcamp_dx",
                FieldSpec::string("JCAMP-DX")
                    .choices([JCAMP_DX_VERSION])
                    .required(),
            )
            .with_field(
                "data_type",
                FieldSpec::string("DATA TYPE")
                    .choices([
                        "INFRARED SPECTRUM",
                        "RAMAN SPECTRUM",
                        "INFRARED PEAK TABLE",
                        "INFRARED INTERFEROGRAM",
                        "INFRARED TRANSFORMED SPECTRUM",
                    ])
                    .required(),
            )
            // spectral parameters
            .with_field(
                "xunits",
                FieldSpec::string("XUNITS")
                    .choices(["l/CM", "MICROMETERS", "NANOMETERS", "SECONDS"])
                    .required(),
            )
            .with_field(
                "yunits",
                FieldSpec::string("YUNITS")
                    .choices([
                        "TRANSMITTANCE",
                        "REFLECTANCE",
                        "ABSORBANCE",
                        "KUBELKA-MUNK",
                        "ARBITRARY UNITS",
                    ])
                    .required(),
            )
            .with_field(
                "firstx",
                FieldSpec::affn("FIRSTX")
                    .required()
                    .description("First actual abscissa value"),
            )
            .with_field(
                "lastx",
                FieldSpec::affn("LASTX")
                    .required()
                    .description("Last actual abscissa value"),
            )
            .with_field("maxx", FieldSpec::affn("MAXX"))
            .with_field("minx", FieldSpec::affn("MINX"))
            .with_field("maxy", FieldSpec::affn("MAXY"))
            .with_field("miny", FieldSpec::affn("MINY"))
            .with_field("xfactor", FieldSpec::affn("XFACTOR").required())
            .with_field("yfactor", FieldSpec::affn("YFACTOR").required())
            .with_field(
                "npoints",
                FieldSpec::affn("NPOINTS")
                    .required()
                    .description("Number of components in the data"),
            )
            .with_field("firsty", FieldSpec::affn("FIRSTY"))
            .with_field(
                "resolution",
                FieldSpec::string("RESOLUTION").description(
                    "Nominal resolution in units specified by ##XUNITS=, as a single number for spectra at constant resolution throughout, or as pairs of the form: R1,X1; ... ;Ri,Xi, where Ri stands for resolution at abscissa Xi.",
                ),
            )
            .with_field(
                "deltax",
                FieldSpec::new("DELTAX", crate::FieldFormat::AffnOrAsdf)
                    .description("The nominal spacing between points for inspection by the user."),
            )
            .with_field("xlabel", FieldSpec::text("XLABEL"))
            .with_field("ylabel", FieldSpec::text("YLABEL"))
            // notes
            .with_field(
                "class",
                FieldSpec::string("CLASS").description(
                    "Specifies the Coblentz Class and the IUPAC Class of digital representation.",
                ),
            )
            .with_field(
                "origin",
                FieldSpec::text("ORIGIN").required().description(
                    "Name of organization, address, telephone number, name of individual contributor, etc., as appropriate.",
                ),
            )
            .with_field(
                "owner",
                FieldSpec::text("OWNER").required().description(
                    "Name of owner of a proprietary spectrum.",
                ),
            )
            .with_field(
                "long_date",
                FieldSpec::long_date("LONG DATE").description(
                    "Date when the spectrum was measured in the form: YYYY/MM/DD HH:MM:SS.SSSS ±UUUU",
                ),
            )
            .with_field(
                "source_reference",
                FieldSpec::text("SOURCE REFERENCE").description(
                    "Adequate identification to locate the original spectrum.",
                ),
            )
            .with_field(
                "cross_reference",
                FieldSpec::text("CROSS REFERENCE").description(
                    "Cross references to additional spectra of the same sample.",
                ),
            )
            // sample information
            .with_field(
                "sample_description",
                FieldSpec::text("SAMPLE DESCRIPTION").description(
                    "Description of a sample that is not a pure compound.",
                ),
            )
            .with_field("iupac_name", FieldSpec::text("IUPAC NAME"))
            .with_field(
                "cas_name",
                FieldSpec::string("CAS NAME")
                    .description("Name according to Chemical Abstracts naming conventions."),
            )
            .with_field("names", FieldSpec::string("NAMES"))
            .with_field("molform", FieldSpec::string("MOLFORM"))
            .with_field("cas_registry_no", FieldSpec::string("CAS REGISTRY NO"))
            .with_field("wiswesser", FieldSpec::string("WISWESSER"))
            .with_field(
                "beilstein_lawson_no",
                FieldSpec::string("BEILSTEIN LAWSON NO"),
            )
            .with_field("mp", FieldSpec::affn("MP"))
            .with_field("bp", FieldSpec::affn("BP"))
            .with_field("refractive_index", FieldSpec::affn("REFRACTIVE INDEX"))
            .with_field("density", FieldSpec::affn("DENSITY"))
            .with_field("mw", FieldSpec::affn("MW"))
            .with_field("concentrations", FieldSpec::string("CONCENTRATIONS"))
            // equipment
            .with_field(
                "spectrometer",
                FieldSpec::string("SPECTROMETER/DATA SYSTEM"),
            )
            .with_field(
                "instrument_parameters",
                FieldSpec::string("INSTRUMENT PARAMETERS"),
            )
            // sampling information
            .with_field("sampling_procedure", FieldSpec::text("SAMPLING PROCEDURE"))
            .with_field("state", FieldSpec::string("STATE"))
            .with_field("path_length", FieldSpec::string("PATH LENGTH"))
            .with_field("pressure", FieldSpec::string("PRESSURE"))
            .with_field("temperature", FieldSpec::string("TEMPERATURE"))
            .with_field("data_processing", FieldSpec::text("DATA PROCESSING"))
            .with_field(
                "audit_trail",
                FieldSpec::new(
                    "AUDIT TRAIL",
                    crate::FieldFormat::Tuple("(AFFN, STRING, TEXT, TEXT, TEXT)".to_string()),
                ),
            )
            // free comments, written as `##=`
            .with_field("comments", FieldSpec::text(""))
            // tabular spectral data
            .with_table("xydata", TableSpec::xydata())
            .with_table("xypoints", TableSpec::xypoints())
            .with_table("peak_table", TableSpec::peak_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_schema_order() {
        let names = Schema::simple().field_names().unwrap();
        assert_eq!(&names[..3], ["title", "jcamp_dx", "data_type"]);
        assert_eq!(names.last().map(String::as_str), Some("comments"));
    }

    #[test]
    fn test_records_before_title_move_to_end() {
        let schema = Schema::new()
            .with_field("early", FieldSpec::text("EARLY"))
            .with_field(TITLE, FieldSpec::text("TITLE"))
            .with_field("late", FieldSpec::text("LATE"));
        assert_eq!(schema.field_names().unwrap(), ["title", "late", "early"]);
    }

    #[test]
    fn test_missing_title() {
        let schema = Schema::new().with_field("owner", FieldSpec::text("OWNER"));
        assert_eq!(schema.field_names(), Err(Error::MissingTitle));
    }

    #[test]
    fn test_required_records() {
        let schema = Schema::simple();
        let required: Vec<&str> = schema
            .fields()
            .filter(|(_, spec)| spec.is_required())
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            required,
            [
                "title", "jcamp_dx", "data_type", "xunits", "yunits", "firstx", "lastx",
                "xfactor", "yfactor", "npoints", "origin", "owner"
            ]
        );
    }

    #[test]
    fn test_tables() {
        let schema = Schema::simple();
        assert_eq!(
            schema.table_names().collect::<Vec<_>>(),
            ["xydata", "xypoints", "peak_table"]
        );
        assert!(schema.table("xydata").is_some_and(|t| t.shape().is_sequential()));
    }
}
