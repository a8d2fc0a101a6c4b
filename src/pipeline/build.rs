//! Block building: drive repair → classify → split for every line.
//!
//! Styling is purely local to a line. No block looks at its neighbours, so
//! the document is built in a single forward pass in source order.

use crate::config::{BlankLines, StyleConfig};
use crate::model::{Block, Document};
use crate::pipeline::classify::{classify_line, LineKind};
use crate::pipeline::repair::repair_line;
use crate::pipeline::runs::{split_runs, split_runs_bold};
use tracing::debug;

/// Build the document for a full Markdown text.
pub fn build_document(markdown: &str, style: &StyleConfig) -> Document {
    build_from_lines(markdown.lines(), style)
}

/// Build the document for an already split sequence of lines.
pub fn build_from_lines<'a, I>(lines: I, style: &StyleConfig) -> Document
where
    I: IntoIterator<Item = &'a str>,
{
    let mut document = Document::new();
    let mut line_count = 0usize;
    for line in lines {
        line_count += 1;
        if let Some(block) = build_block(line, style) {
            document.push(block);
        }
    }

    let summary = document.summary();
    debug!(
        "Built {} blocks from {} lines ({} headings, {} list items, {} paragraphs, {} blank)",
        document.len(),
        line_count,
        summary.headings,
        summary.list_items,
        summary.paragraphs,
        summary.blank_lines
    );
    document
}

/// Turn one raw source line into its block, if it produces one.
///
/// Only whitespace-only lines, and headings with no text once delimiters are
/// gone, can produce nothing, and only under [`BlankLines::Drop`]. Under
/// [`BlankLines::Preserve`] both become a blank paragraph.
pub fn build_block(line: &str, style: &StyleConfig) -> Option<Block> {
    let repaired = repair_line(line.trim_end());

    match classify_line(&repaired, style.max_marker_indent) {
        LineKind::Heading { level, text } => {
            let size = style.heading_size(level);
            let runs = if style.heading_bold {
                split_runs_bold(text, size)
            } else {
                split_runs(text, size)
            };
            if runs.iter().all(|r| r.text.trim().is_empty()) {
                return blank_block(style);
            }
            Some(Block::Heading { level, runs })
        }
        LineKind::ListItem { indent, text } => {
            let level = style.nesting_level(indent);
            let bullet = style.bullet(level);
            Some(Block::ListItem {
                level,
                glyph: bullet.glyph.clone(),
                glyph_size_pt: bullet.size_pt,
                indent: style.list_indent(level),
                runs: split_runs(text, bullet.size_pt),
            })
        }
        LineKind::Paragraph(text) => Some(Block::Paragraph {
            runs: split_runs(text, style.paragraph_size),
        }),
        LineKind::Blank => blank_block(style),
    }
}

fn blank_block(style: &StyleConfig) -> Option<Block> {
    match style.blank_lines {
        BlankLines::Drop => None,
        BlankLines::Preserve => Some(Block::Paragraph { runs: Vec::new() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Run;

    #[test]
    fn heading_runs_forced_bold_at_level_size() {
        let block = build_block("## Some **mixed** title", &StyleConfig::default()).unwrap();
        assert_eq!(
            block,
            Block::Heading {
                level: 2,
                runs: vec![Run::bold("Some mixed title", 14.0)],
            }
        );
    }

    #[test]
    fn heading_bold_can_be_disabled() {
        let style = StyleConfig::builder().heading_bold(false).build().unwrap();
        let block = build_block("# Plain **and** bold", &style).unwrap();
        let bolds: Vec<bool> = block.runs().iter().map(|r| r.bold).collect();
        assert_eq!(bolds, [false, true, false]);
    }

    #[test]
    fn list_item_carries_glyph_and_indent() {
        let block = build_block("    - Nested item", &StyleConfig::default()).unwrap();
        match block {
            Block::ListItem {
                level,
                glyph,
                glyph_size_pt,
                indent,
                runs,
            } => {
                assert_eq!(level, 2);
                assert_eq!(glyph, "➢");
                assert_eq!(glyph_size_pt, 10.0);
                assert!((indent.left_cm - 1.0).abs() < f32::EPSILON);
                assert!((indent.first_line_cm + 0.25).abs() < f32::EPSILON);
                assert_eq!(runs, vec![Run::plain("Nested item", 10.0)]);
            }
            other => panic!("expected list item, got {other:?}"),
        }
    }

    #[test]
    fn list_item_keeps_leading_bold() {
        let block = build_block("* **Key:** explained", &StyleConfig::default()).unwrap();
        assert_eq!(
            block.runs(),
            [Run::bold("Key:", 10.0), Run::plain(" explained", 10.0)]
        );
    }

    #[test]
    fn colon_artifact_repaired_before_splitting() {
        let block = build_block("Label:** value", &StyleConfig::default()).unwrap();
        assert_eq!(
            block,
            Block::Paragraph {
                runs: vec![Run::plain("Label: value", 11.0)],
            }
        );
    }

    #[test]
    fn blank_line_policy() {
        assert_eq!(build_block("   ", &StyleConfig::default()), None);
        let preserve = StyleConfig::builder()
            .blank_lines(BlankLines::Preserve)
            .build()
            .unwrap();
        assert_eq!(
            build_block("", &preserve),
            Some(Block::Paragraph { runs: vec![] })
        );
    }

    #[test]
    fn heading_without_text_is_treated_as_blank() {
        for line in ["# ** **", "## ** **", "### ** ** **"] {
            assert_eq!(build_block(line, &StyleConfig::default()), None, "{line:?}");
        }
        let preserve = StyleConfig::builder()
            .blank_lines(BlankLines::Preserve)
            .build()
            .unwrap();
        assert_eq!(
            build_block("# ** **", &preserve),
            Some(Block::Paragraph { runs: vec![] })
        );
    }

    #[test]
    fn deep_indent_reaches_clamped_level_when_allowed() {
        let style = StyleConfig::builder().max_marker_indent(24).build().unwrap();
        let block = build_block(&format!("{}* deep", " ".repeat(20)), &style).unwrap();
        assert!(matches!(block, Block::ListItem { level: 5, ref glyph, .. } if glyph == "⁃"));
    }

    #[test]
    fn document_preserves_source_order() {
        let doc = build_document("# A\ntext\n* item\n## B", &StyleConfig::default());
        let kinds: Vec<&str> = doc
            .iter()
            .map(|b| match b {
                Block::Heading { .. } => "h",
                Block::ListItem { .. } => "li",
                Block::Paragraph { .. } => "p",
            })
            .collect();
        assert_eq!(kinds, ["h", "p", "li", "h"]);
    }
}
