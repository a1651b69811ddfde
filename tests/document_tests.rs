use jdx_write::{
    to_string, Block, CompoundDocument, Error, FieldSpec, JdxOptions, Schema, Value,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

/// Collects warnings so the validation report logged by `to_string` can be checked.
struct CaptureLogger;

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn capture_warnings() {
    INIT.call_once(|| {
        log::set_logger(&CaptureLogger).unwrap();
        log::set_max_level(LevelFilter::Warn);
    });
}

fn ir_block() -> Block {
    Block::builder(&Schema::simple())
        .field("title", "Some title")
        .field("data_type", "IR")
        .field("xunits", "l/CM")
        .field("origin", "My origin")
        .field("owner", "Me")
        .table("xypoints", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .build()
        .unwrap()
}

const EXPECTED_RECORDS: &str = "##TITLE= Some title
##JCAMP-DX= 5.01
##DATA TYPE= IR
##XUNITS= l/CM
##YUNITS=
##FIRSTX= 1
##LASTX= 3
##XFACTOR= 1
##YFACTOR= 1
##NPOINTS= 3
##ORIGIN= My origin
##OWNER= Me
##XYPOINTS= (XY..XY)";

#[test]
fn test_block_init() {
    let block = Block::builder(&Schema::simple())
        .field("title", "Some title")
        .field("data_type", "IR")
        .table("xypoints", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .build()
        .unwrap();

    assert_eq!(block.value("title"), Some(&Value::from("Some title")));
    assert_eq!(block.value("jcamp_dx"), Some(&Value::from("5.01")));
    assert_eq!(block.value("data_type"), Some(&Value::from("IR")));
    assert_eq!(block.table_name(), "xypoints");
    assert_eq!(
        block.table().data(),
        Some(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]][..])
    );
    assert_eq!(block.value("firstx").and_then(Value::as_f64), Some(1.0));
    assert_eq!(block.value("lastx").and_then(Value::as_f64), Some(3.0));
    assert_eq!(block.value("npoints").and_then(Value::as_i64), Some(3));
    assert_eq!(block.value("xfactor").and_then(Value::as_i64), Some(1));
    assert_eq!(block.value("yfactor").and_then(Value::as_i64), Some(1));
}

#[test]
fn test_jcamp_dx_version_is_forced() {
    let block = Block::builder(&Schema::simple())
        .field("title", "t")
        .field("jcamp_dx", "4.24")
        .table("xypoints", vec![vec![1.0], vec![2.0]])
        .build()
        .unwrap();
    assert_eq!(block.value("jcamp_dx"), Some(&Value::from("5.01")));
}

#[test]
fn test_custom_record_order() {
    let schema = Schema::simple().with_field(
        "my_custom_record",
        FieldSpec::string("$MY CUSTOM RECORD")
            .choices(["A", "B"])
            .required(),
    );
    let block = Block::builder(&schema)
        .field("title", "title")
        .field("my_custom_record", "A")
        .table("xypoints", vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        .build()
        .unwrap();

    let names: Vec<&str> = block.records().names().collect();
    assert_eq!(names.first(), Some(&"title"));
    assert_eq!(names.last(), Some(&"my_custom_record"));
    assert!(block
        .render_full()
        .contains("##$MY CUSTOM RECORD= A\n##XYPOINTS= (XY..XY)"));
    assert!(block.validate().get("my_custom_record").is_none());
}

#[test]
fn test_schema_is_not_mutated_by_blocks() {
    let schema = Schema::simple();
    let first = Block::builder(&schema)
        .field("title", "first")
        .table("xypoints", vec![vec![1.0], vec![2.0]])
        .build()
        .unwrap();
    let second = Block::builder(&schema)
        .field("title", "second")
        .table("xydata", vec![vec![1.0], vec![2.0]])
        .build()
        .unwrap();

    assert_eq!(first.value("title"), Some(&Value::from("first")));
    assert_eq!(second.value("title"), Some(&Value::from("second")));
    assert!(schema.table("xypoints").and_then(|t| t.data()).is_none());
}

#[test]
fn test_output_string() {
    let mut block = ir_block();
    assert_eq!(
        block.to_string(),
        format!(
            "{}\n1.0000, 4.0000\n2.0000, 5.0000\n3.0000, 6.0000\n##END=",
            EXPECTED_RECORDS
        )
    );

    block.set_single_column(false).unwrap();
    assert_eq!(
        block.render_full(),
        format!(
            "{}\n1.0000, 4.0000 : 2.0000, 5.0000 : 3.0000, 6.0000\n##END=",
            EXPECTED_RECORDS
        )
    );
}

#[test]
fn test_to_string_logs_validation_report() {
    capture_warnings();
    let block = ir_block();
    let text = to_string(&block);
    assert!(text.ends_with("##END="));

    let warnings = WARNINGS.lock().unwrap();
    assert!(warnings
        .iter()
        .any(|w| w.contains("DATA-LABEL '##YUNITS=' is required")));
    assert!(warnings
        .iter()
        .any(|w| w.contains("Unexpected value for DATA-LABEL '##DATA TYPE='")));
}

#[test]
fn test_validation_report_json() {
    let report = ir_block().validate();
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
    assert_eq!(json["yunits"][0], "DATA-LABEL '##YUNITS=' is required.");
    assert!(json["data_type"][0]
        .as_str()
        .unwrap()
        .starts_with("Unexpected value for DATA-LABEL '##DATA TYPE='. Available values ['INFRARED SPECTRUM'"));
}

#[test]
fn test_decimal_places_option() {
    let block = Block::builder(&Schema::simple())
        .field("title", "t")
        .table("xydata", vec![vec![1.0, 2.0], vec![0.126, 0.5]])
        .options(JdxOptions::new().with_decimal_places(2))
        .build()
        .unwrap();
    assert!(block
        .render_full()
        .ends_with("##XYDATA= (X++(Y..Y))\n1.00 0.13\n2.00 0.50\n##END="));
}

#[test]
fn test_construction_errors() {
    let schema = Schema::simple();
    let data = || vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];

    let err = Block::builder(&schema).field("title", "t").build().unwrap_err();
    assert_eq!(err.to_string(), "No actual data is provided");

    let err = Block::builder(&schema)
        .field("colour", "red")
        .table("xypoints", data())
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "Unexpected data label 'colour'");

    let err = Block::builder(&schema)
        .table("xypoints", data())
        .table("peak_table", data())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::duplicate_table("xypoints", "peak_table"));

    for factor in ["xfactor", "yfactor"] {
        let err = Block::builder(&schema)
            .field(factor, 1)
            .table("xypoints", data())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}

#[test]
fn test_schema_without_title() {
    let schema = Schema::new().with_field("owner", FieldSpec::text("OWNER"));
    let err = Block::builder(&schema)
        .table("xypoints", vec![vec![1.0], vec![2.0]])
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingTitle);
}

#[test]
fn test_compound_init() {
    let document = CompoundDocument::new("test").unwrap();
    let header = document.header();
    assert_eq!(
        header.field("title").and_then(|f| f.value()),
        Some(&Value::from("test"))
    );
    assert_eq!(
        header.field("jcamp_dx").and_then(|f| f.value()),
        Some(&Value::from("5.01"))
    );
    assert_eq!(
        header.field("data_type").and_then(|f| f.value()),
        Some(&Value::from("LINK"))
    );
    assert_eq!(
        header
            .field("block_count")
            .and_then(|f| f.value())
            .and_then(Value::as_i64),
        Some(0)
    );
    assert!(document.blocks().is_empty());

    let first = ir_block();
    let second = Block::builder(&Schema::simple())
        .field("title", "Some title2")
        .field("data_type", "IR")
        .table("xydata", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .build()
        .unwrap();
    let document = CompoundDocument::with_blocks("test", vec![first, second]).unwrap();
    assert_eq!(document.block_count(), 2);
    assert_eq!(
        document.blocks()[1].value("title"),
        Some(&Value::from("Some title2"))
    );
}

#[test]
fn test_compound_output_string() {
    let first = ir_block();
    let second = Block::builder(&Schema::simple())
        .field("title", "Some title2")
        .field("data_type", "IR")
        .table("xydata", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .build()
        .unwrap();

    let mut document = CompoundDocument::new("test").unwrap();
    document.add_block(first.clone()).unwrap();
    document.add_block(second.clone()).unwrap();

    assert_eq!(
        to_string(&document),
        format!(
            "##TITLE= test\n##JCAMP-DX= 5.01\n##DATA TYPE= LINK\n##BLOCKS= 2\n\n{}\n\n{}\n\n##END=",
            first, second
        )
    );
}

#[test]
fn test_to_file() {
    let path = std::env::temp_dir().join(format!("jdx_write_{}.jdx", std::process::id()));
    let block = ir_block();
    jdx_write::to_file(&path, &block).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(written, block.render_full());
}
