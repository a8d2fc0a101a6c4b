//! Error types for the md2docx library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2DocxError`] — **Fatal**: the conversion cannot proceed at all
//!   (input file missing, output not writable, invalid style configuration).
//!   Returned as `Err(Md2DocxError)` from the top-level `convert*` functions.
//!
//! * [`PageError`] — **Non-fatal**: a single source page could not be used
//!   (unreadable file, nothing left after cleanup) but every other page is
//!   fine. Stored inside [`crate::notes::PageResult`] and rendered as a
//!   placeholder so one bad page never costs the whole document.
//!
//! The Markdown-to-document core itself has no error path: every line,
//! however malformed, is classified and converted.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2docx library.
#[derive(Debug, Error)]
pub enum Md2DocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip container for the .docx package could not be assembled.
    #[error("Failed to build .docx package: {detail}")]
    Package { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed, or a style file could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<zip::result::ZipError> for Md2DocxError {
    fn from(e: zip::result::ZipError) -> Self {
        Md2DocxError::Package {
            detail: e.to_string(),
        }
    }
}

/// A non-fatal error for a single source page.
///
/// Stored alongside [`crate::notes::PageResult`] when a page fails.
/// Assembly continues and substitutes a clearly marked placeholder.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// The page's Markdown could not be read.
    #[error("Page {page}: could not be read: {detail}")]
    ReadFailed { page: usize, detail: String },

    /// Nothing was left of the page after cleanup.
    #[error("Page {page}: no content")]
    Empty { page: usize },
}
