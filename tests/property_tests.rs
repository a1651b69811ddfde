//! Property-based tests for line layout guarantees
//!
//! These complement the document tests by checking width and shape properties
//! of wrapped records and tables across generated inputs.

use jdx_write::record::{wrap_line, MAX_LINE_WIDTH};
use jdx_write::{Block, JdxOptions, Schema, TableSpec};
use proptest::prelude::*;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9/.,()-]{1,12}", 0..40)
}

fn points() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 0..120)
        .prop_map(|pairs| pairs.into_iter().unzip())
}

proptest! {
    #[test]
    fn prop_wrap_respects_width(words in words(), width in 12usize..100) {
        let text = words.join(" ");
        let lines = wrap_line(&text, width);
        for line in &lines {
            prop_assert!(line.chars().count() <= width);
        }
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn prop_wrap_never_splits_words(word in "[a-z]{1,200}") {
        let lines = wrap_line(&word, MAX_LINE_WIDTH);
        prop_assert_eq!(lines, vec![word]);
    }

    #[test]
    fn prop_packed_table_lines_fit((xs, ys) in points(), decimals in 0usize..6) {
        let npoints = xs.len();
        let mut table = TableSpec::xypoints();
        table.set_data(vec![xs, ys]).unwrap();
        table.set_decimal_places(decimals);
        table.set_single_column(false).unwrap();

        let lines = table.data_lines();
        for line in &lines {
            prop_assert!(line.len() <= MAX_LINE_WIDTH);
        }
        let groups: usize = lines.iter().map(|line| line.split(" : ").count()).sum();
        prop_assert_eq!(groups, npoints);
    }

    #[test]
    fn prop_single_column_has_one_line_per_point((xs, ys) in points()) {
        let npoints = xs.len();
        let mut table = TableSpec::xydata();
        table.set_data(vec![xs, ys]).unwrap();
        prop_assert_eq!(table.data_lines().len(), npoints);
    }

    #[test]
    fn prop_preview_shape((xs, ys) in points()) {
        let npoints = xs.len();
        let block = Block::builder(&Schema::simple())
            .field("title", "preview")
            .table("xypoints", vec![xs, ys])
            .options(JdxOptions::new())
            .build()
            .unwrap();

        let full = block.render_full();
        let preview = block.render_preview();
        prop_assert!(preview.ends_with("##END="));
        if npoints > 3 {
            prop_assert!(preview.contains("\n$$etc...\n"));
            prop_assert!(preview.lines().count() < full.lines().count());
        } else {
            prop_assert_eq!(preview, full);
        }
    }

    #[test]
    fn prop_npoints_matches_data((xs, ys) in points()) {
        let npoints = xs.len();
        let block = Block::builder(&Schema::simple())
            .field("title", "count")
            .table("xydata", vec![xs, ys])
            .build()
            .unwrap();
        prop_assert_eq!(
            block.value("npoints").and_then(|v| v.as_i64()),
            Some(npoints as i64)
        );
    }
}
