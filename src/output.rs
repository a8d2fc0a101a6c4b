//! Result types returned by the conversion entry points.

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// A converted document plus what it took to build it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub document: Document,
    pub stats: ConversionStats,
}

/// Summary statistics for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Source lines read.
    pub lines: usize,
    /// Blocks in the resulting document.
    pub blocks: usize,
    pub headings: usize,
    pub list_items: usize,
    pub paragraphs: usize,
    /// Preserved blank-line paragraphs.
    pub blank_lines: usize,
    /// Size of the written package; 0 when nothing was written.
    pub bytes_written: u64,
    pub total_duration_ms: u64,
}

impl ConversionStats {
    pub(crate) fn for_document(document: &Document, lines: usize) -> Self {
        let summary = document.summary();
        Self {
            lines,
            blocks: document.len(),
            headings: summary.headings,
            list_items: summary.list_items,
            paragraphs: summary.paragraphs,
            blank_lines: summary.blank_lines,
            ..Self::default()
        }
    }
}
