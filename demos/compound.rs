//! A LINK document with two blocks and a custom record.
//!
//! Run with: RUST_LOG=debug cargo run --example compound

use jdx_write::{to_writer, Block, CompoundDocument, FieldSpec, JdxOptions, Schema};
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let schema = Schema::simple().with_field(
        "operator",
        FieldSpec::string("$OPERATOR")
            .required()
            .description("Person who ran the instrument"),
    );

    let raman = Block::builder(&schema)
        .field("title", "Raman, sample 1")
        .field("data_type", "RAMAN SPECTRUM")
        .field("xunits", "l/CM")
        .field("yunits", "ARBITRARY UNITS")
        .field("origin", "jdx_write demo")
        .field("owner", "public domain")
        .field("operator", "A. Nonymous")
        .table("xydata", vec![vec![100.0, 101.0, 102.0], vec![0.1, 0.4, 0.2]])
        .build()?;

    let peaks = Block::builder(&schema)
        .field("title", "Raman peaks, sample 1")
        .field("data_type", "INFRARED PEAK TABLE")
        .field("xunits", "l/CM")
        .field("yunits", "ARBITRARY UNITS")
        .field("origin", "jdx_write demo")
        .field("owner", "public domain")
        .field("operator", "A. Nonymous")
        .table("peak_table", vec![vec![101.0], vec![0.4]])
        .options(JdxOptions::packed().with_decimal_places(1))
        .build()?;

    let mut document = CompoundDocument::new("Sample 1")?;
    document.add_block(raman)?;
    document.add_block(peaks)?;

    to_writer(io::stdout().lock(), &document)?;
    println!();

    Ok(())
}
