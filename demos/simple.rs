//! A single infrared spectrum written as JCAMP-DX.
//!
//! Run with: RUST_LOG=warn cargo run --example simple

use jdx_write::{to_string, Block, Schema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let wavenumbers: Vec<f64> = (0..12).map(|i| 4000.0 - f64::from(i) * 250.0).collect();
    let absorbance: Vec<f64> = wavenumbers
        .iter()
        .map(|x| (-((x - 1700.0) / 200.0).powi(2)).exp())
        .collect();

    let schema = Schema::simple();
    let block = Block::builder(&schema)
        .field("title", "Carbonyl stretch, synthetic")
        .field("data_type", "INFRARED SPECTRUM")
        .field("xunits", "l/CM")
        .field("yunits", "ABSORBANCE")
        .field("origin", "jdx_write demo")
        .field("long_date", "2024/01/15 10:30:00")
        .table("xypoints", vec![wavenumbers, absorbance])
        .build()?;

    // OWNER is left out on purpose: the warning shows up in the log
    println!("{}", to_string(&block));

    println!("\nPreview:\n{}", block.render_preview());

    Ok(())
}
