//! The styled block model produced by the conversion core.
//!
//! A [`Document`] is an ordered sequence of [`Block`]s in source-line order.
//! Each block owns its [`Run`]s. Nothing here knows about the target file
//! format: emitters in [`crate::emit`] consume this model as-is.

use serde::{Deserialize, Serialize};

/// A maximal span of text sharing the same emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Font size in points.
    pub size_pt: f32,
}

impl Run {
    pub fn plain(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size_pt,
        }
    }

    pub fn bold(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            bold: true,
            size_pt,
        }
    }
}

/// Hanging-indent metrics of a list item, in centimetres.
///
/// A negative `first_line_cm` pulls the bullet glyph to the left of the
/// wrapped text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListIndent {
    pub left_cm: f32,
    pub first_line_cm: f32,
}

/// One structural unit of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Heading of level 1–3. Runs are always bold.
    Heading { level: u8, runs: Vec<Run> },
    /// Bullet list item at nesting level 1–5.
    ListItem {
        level: u8,
        glyph: String,
        glyph_size_pt: f32,
        indent: ListIndent,
        runs: Vec<Run>,
    },
    /// Plain paragraph. Zero runs marks a preserved blank line.
    Paragraph { runs: Vec<Run> },
}

impl Block {
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading { runs, .. }
            | Block::ListItem { runs, .. }
            | Block::Paragraph { runs } => runs,
        }
    }

    /// Concatenated run text, ignoring emphasis.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Block::Paragraph { runs } if runs.is_empty())
    }
}

/// The ordered block sequence produced by one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count blocks per variant.
    pub fn summary(&self) -> DocumentSummary {
        let mut summary = DocumentSummary::default();
        for block in &self.blocks {
            match block {
                Block::Heading { .. } => summary.headings += 1,
                Block::ListItem { .. } => summary.list_items += 1,
                Block::Paragraph { runs } if runs.is_empty() => summary.blank_lines += 1,
                Block::Paragraph { .. } => summary.paragraphs += 1,
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Per-variant block counts of a [`Document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub headings: usize,
    pub list_items: usize,
    pub paragraphs: usize,
    pub blank_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_variant() {
        let mut doc = Document::new();
        doc.push(Block::Heading {
            level: 1,
            runs: vec![Run::bold("T", 16.0)],
        });
        doc.push(Block::Paragraph { runs: vec![] });
        doc.push(Block::Paragraph {
            runs: vec![Run::plain("Body", 11.0)],
        });

        let s = doc.summary();
        assert_eq!(s.headings, 1);
        assert_eq!(s.list_items, 0);
        assert_eq!(s.paragraphs, 1);
        assert_eq!(s.blank_lines, 1);
        assert!(doc.blocks()[1].is_blank());
    }

    #[test]
    fn plain_text_joins_runs() {
        let block = Block::Paragraph {
            runs: vec![
                Run::plain("Some ", 11.0),
                Run::bold("bold", 11.0),
                Run::plain(" word.", 11.0),
            ],
        };
        assert_eq!(block.plain_text(), "Some bold word.");
    }

    #[test]
    fn block_serialises_with_kind_tag() {
        let block = Block::Heading {
            level: 2,
            runs: vec![Run::bold("Intro", 14.0)],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""kind":"heading""#), "got: {json}");
    }
}
