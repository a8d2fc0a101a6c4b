//! # md2docx
//!
//! Convert loosely-formed, model-generated Markdown notes into styled Word
//! documents.
//!
//! ## Why this crate?
//!
//! Notes transcribed by a language model come back as "almost Markdown":
//! bold labels closed one token too late (`Label:** text`), stray `**` at the
//! end of a line, bullets indented by whatever the model felt like. A strict
//! CommonMark parser renders those artefacts verbatim. This crate instead
//! speaks a small, forgiving dialect (headings 1–3, bullets up to five
//! levels, inline bold, plain paragraphs), repairs the delimiter artefacts
//! line by line and produces a styled block model that is written out as
//! a .docx file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown text
//!  │
//!  ├─ 1. Repair    drop stray ** delimiters, keep **Label:** spans
//!  ├─ 2. Classify  heading / list item / paragraph / blank, per line
//!  ├─ 3. Split     inline text → bold and plain runs
//!  ├─ 4. Build     style each line into a Block (sizes, glyphs, indents)
//!  └─ 5. Emit      Document → .docx package (or JSON)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use md2docx::{parse, Block, StyleConfig};
//!
//! let doc = parse("# Title\nSome **bold** word.\n* Item", &StyleConfig::default());
//! assert_eq!(doc.len(), 3);
//! assert!(matches!(doc.blocks()[2], Block::ListItem { level: 1, .. }));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2docx` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod emit;
pub mod error;
pub mod model;
pub mod notes;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    BlankLines, BulletStyle, NotesLayout, PageSeparator, StyleConfig, StyleConfigBuilder,
};
pub use convert::{
    convert, convert_file, convert_to_docx_bytes, convert_to_file, document_to_docx_bytes, parse,
};
pub use emit::{DocumentEmitter, DocxEmitter, JsonEmitter};
pub use error::{Md2DocxError, PageError};
pub use model::{Block, Document, DocumentSummary, ListIndent, Run};
pub use notes::{assemble_notes, read_pages, PageResult};
pub use output::{ConversionOutput, ConversionStats};
