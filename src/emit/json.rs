use super::DocumentEmitter;
use crate::error::Md2DocxError;
use crate::model::Document;
use std::io::Write;

/// Writes the block model itself as pretty-printed JSON.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DocumentEmitter for JsonEmitter<W> {
    type Output = W;

    fn emit(mut self, document: &Document) -> Result<W, Md2DocxError> {
        serde_json::to_writer_pretty(&mut self.writer, document)
            .map_err(|e| Md2DocxError::Internal(format!("JSON serialisation failed: {e}")))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| Md2DocxError::Internal(format!("JSON write failed: {e}")))?;
        Ok(self.writer)
    }
}
