//! Conversion entry points.
//!
//! [`parse`] is the pure core: text in, [`Document`] out, no I/O and no error
//! path. The remaining functions wrap it with the .docx emitter and file
//! handling. Every call builds its own `Document`, so concurrent
//! conversions never share state.

use crate::config::StyleConfig;
use crate::emit::{DocumentEmitter, DocxEmitter};
use crate::error::Md2DocxError;
use crate::model::Document;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::build::build_document;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Parse Markdown text into a styled block document.
pub fn parse(markdown: &str, style: &StyleConfig) -> Document {
    build_document(markdown, style)
}

/// Parse Markdown and report block statistics alongside the document.
pub fn convert(markdown: &str, style: &StyleConfig) -> ConversionOutput {
    let start = Instant::now();
    let document = parse(markdown, style);
    let mut stats = ConversionStats::for_document(&document, markdown.lines().count());
    stats.total_duration_ms = start.elapsed().as_millis() as u64;
    ConversionOutput { document, stats }
}

/// Render an already built document to .docx bytes.
pub fn document_to_docx_bytes(document: &Document) -> Result<Vec<u8>, Md2DocxError> {
    let cursor = DocxEmitter::new(Cursor::new(Vec::new())).emit(document)?;
    Ok(cursor.into_inner())
}

/// Convert Markdown text straight to .docx bytes.
pub fn convert_to_docx_bytes(markdown: &str, style: &StyleConfig) -> Result<Vec<u8>, Md2DocxError> {
    document_to_docx_bytes(&parse(markdown, style))
}

/// Convert Markdown text and write the .docx to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn convert_to_file(
    markdown: &str,
    output_path: impl AsRef<Path>,
    style: &StyleConfig,
) -> Result<ConversionStats, Md2DocxError> {
    let start = Instant::now();
    let path = output_path.as_ref();
    info!("Converting {} bytes of Markdown → {}", markdown.len(), path.display());

    let output = convert(markdown, style);
    let bytes = document_to_docx_bytes(&output.document)?;
    write_atomic(path, &bytes)?;

    let mut stats = output.stats;
    stats.bytes_written = bytes.len() as u64;
    stats.total_duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Wrote {} blocks ({} bytes) to {} in {}ms",
        stats.blocks,
        stats.bytes_written,
        path.display(),
        stats.total_duration_ms
    );
    Ok(stats)
}

/// Read a Markdown file and write the converted .docx to `output_path`.
pub fn convert_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    style: &StyleConfig,
) -> Result<ConversionStats, Md2DocxError> {
    let markdown = read_markdown(input_path.as_ref())?;
    convert_to_file(&markdown, output_path, style)
}

/// Read a UTF-8 Markdown file, mapping failures to library errors.
pub fn read_markdown(path: &Path) -> Result<String, Md2DocxError> {
    if !path.exists() {
        return Err(Md2DocxError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| Md2DocxError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Write `bytes` to `path` via a temp file in the same directory and a rename.
///
/// The temp file is removed on every error path, including a failed rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Md2DocxError> {
    let write_err = |source: std::io::Error| Md2DocxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".md2docx-")
        .suffix(".docx.tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_reports_counts() {
        let out = convert("# T\n\n* a\n* b\nbody", &StyleConfig::default());
        assert_eq!(out.stats.lines, 5);
        assert_eq!(out.stats.blocks, 4);
        assert_eq!(out.stats.headings, 1);
        assert_eq!(out.stats.list_items, 2);
        assert_eq!(out.stats.paragraphs, 1);
        assert_eq!(out.stats.bytes_written, 0);
    }

    #[test]
    fn docx_bytes_are_a_zip() {
        let bytes = convert_to_docx_bytes("# Hi", &StyleConfig::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn read_markdown_missing_file() {
        let err = read_markdown(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(matches!(err, Md2DocxError::FileNotFound { .. }));
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.docx");
        write_atomic(&path, b"PK").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"PK");
        assert_eq!(entries(&dir.path().join("nested")), ["out.docx"]);
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        std::fs::write(&path, b"old").unwrap();
        write_atomic(&path, b"PK new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"PK new");
        assert_eq!(entries(dir.path()), ["out.docx"]);
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the final rename fail.
        let path = dir.path().join("out.docx");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let err = write_atomic(&path, b"PK").unwrap_err();
        assert!(matches!(err, Md2DocxError::OutputWriteFailed { .. }));
        assert_eq!(entries(dir.path()), ["out.docx"]);
        assert!(path.is_dir());
    }
}
