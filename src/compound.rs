//! Compound (`LINK`) documents: a header record set followed by blocks.
//!
//! ```rust
//! use jdx_write::{Block, CompoundDocument, Schema};
//!
//! let schema = Schema::simple();
//! let block = Block::builder(&schema)
//!     .field("title", "first")
//!     .table("xypoints", vec![vec![1.0], vec![2.0]])
//!     .build()
//!     .unwrap();
//!
//! let mut document = CompoundDocument::new("test").unwrap();
//! document.add_block(block.clone()).unwrap();
//! document.add_block(block).unwrap();
//!
//! let text = document.render_full();
//! assert!(text.starts_with("##TITLE= test\n##JCAMP-DX= 5.01\n##DATA TYPE= LINK\n##BLOCKS= 2\n\n"));
//! assert!(text.ends_with("\n\n##END="));
//! ```

use crate::block::END_MARKER;
use crate::schema::{JCAMP_DX_VERSION, LINK_DATA_TYPE};
use crate::{Block, RecordSet, Render, Result, Schema, ValidationReport};
use std::fmt;

const SECTION_SEPARATOR: &str = "\n\n";

/// A LINK document header plus an ordered list of owned blocks.
///
/// `##BLOCKS=` always equals the number of blocks held.
#[derive(Clone, Debug)]
pub struct CompoundDocument {
    header: RecordSet,
    blocks: Vec<Block>,
}

impl CompoundDocument {
    /// Creates an empty compound document.
    ///
    /// # Errors
    ///
    /// Fails only when the header rejects one of its fixed values.
    pub fn new(title: &str) -> Result<Self> {
        Self::with_blocks(title, Vec::new())
    }

    /// Creates a compound document holding `blocks`, in order.
    ///
    /// # Errors
    ///
    /// Fails only when the header rejects one of its fixed values.
    pub fn with_blocks(title: &str, blocks: Vec<Block>) -> Result<Self> {
        let mut header = RecordSet::from_schema(&Schema::link())?;
        header.set_value("title", title)?;
        header.set_value("jcamp_dx", JCAMP_DX_VERSION)?;
        header.set_value("data_type", LINK_DATA_TYPE)?;
        header.set_value("block_count", blocks.len())?;
        Ok(CompoundDocument { header, blocks })
    }

    /// Appends a block and updates `##BLOCKS=`.
    ///
    /// # Errors
    ///
    /// Fails only when the header rejects the new count.
    pub fn add_block(&mut self, block: Block) -> Result<()> {
        self.blocks.push(block);
        self.header.set_value("block_count", self.blocks.len())?;
        log::debug!("compound document now holds {} blocks", self.blocks.len());
        Ok(())
    }

    #[must_use]
    pub fn header(&self) -> &RecordSet {
        &self.header
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Header problems plus each block's, keyed `blocks[i].<record>`.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = self.header.validate();
        for (i, block) in self.blocks.iter().enumerate() {
            report.merge_prefixed(&format!("blocks[{}]", i), block.validate());
        }
        report
    }

    #[must_use]
    pub fn render_full(&self) -> String {
        self.join_sections(Block::render_full)
    }

    #[must_use]
    pub fn render_preview(&self) -> String {
        self.join_sections(Block::render_preview)
    }

    fn join_sections(&self, render_block: fn(&Block) -> String) -> String {
        let mut sections = Vec::with_capacity(self.blocks.len() + 2);
        sections.push(self.header.render());
        sections.extend(self.blocks.iter().map(render_block));
        sections.push(END_MARKER.to_string());
        sections.join(SECTION_SEPARATOR)
    }
}

impl Render for CompoundDocument {
    fn validate(&self) -> ValidationReport {
        CompoundDocument::validate(self)
    }

    fn render_full(&self) -> String {
        CompoundDocument::render_full(self)
    }

    fn render_preview(&self) -> String {
        CompoundDocument::render_preview(self)
    }
}

impl fmt::Display for CompoundDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_full())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn block(title: &str, points: usize) -> Block {
        let xs: Vec<f64> = (0..points).map(|i| i as f64).collect();
        Block::builder(&Schema::simple())
            .field("title", title)
            .table("xypoints", vec![xs.clone(), xs])
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_document() {
        let document = CompoundDocument::new("empty").unwrap();
        assert_eq!(
            document.render_full(),
            "##TITLE= empty\n##JCAMP-DX= 5.01\n##DATA TYPE= LINK\n##BLOCKS= 0\n\n##END="
        );
        assert!(document.validate().is_valid());
    }

    #[test]
    fn test_block_count_tracks_blocks() {
        let mut document = CompoundDocument::with_blocks("t", vec![block("a", 1)]).unwrap();
        assert_eq!(document.block_count(), 1);
        document.add_block(block("b", 1)).unwrap();
        assert_eq!(
            document.header().field("block_count").and_then(|f| f.value()),
            Some(&Value::from(2usize))
        );
    }

    #[test]
    fn test_sections_are_blank_line_separated() {
        let first = block("a", 2);
        let second = block("b", 2);
        let document =
            CompoundDocument::with_blocks("test", vec![first.clone(), second.clone()]).unwrap();
        let expected = format!(
            "##TITLE= test\n##JCAMP-DX= 5.01\n##DATA TYPE= LINK\n##BLOCKS= 2\n\n{}\n\n{}\n\n##END=",
            first.render_full(),
            second.render_full()
        );
        assert_eq!(document.render_full(), expected);
    }

    #[test]
    fn test_preview_uses_block_previews() {
        let document = CompoundDocument::with_blocks("t", vec![block("a", 10)]).unwrap();
        assert!(document.render_preview().contains("$$etc..."));
        assert!(!document.render_full().contains("$$etc..."));
    }

    #[test]
    fn test_block_reports_are_prefixed() {
        let document = CompoundDocument::with_blocks("t", vec![block("a", 1)]).unwrap();
        let report = document.validate();
        assert!(report.get("blocks[0].owner").is_some());
        assert!(report.get("owner").is_none());
    }
}
