//! Document emitters: realise a [`Document`] in a concrete output format.
//!
//! This is the only place that knows about target formats. The conversion
//! core hands over the block model and nothing else.

pub mod docx;
pub mod json;

pub use docx::DocxEmitter;
pub use json::JsonEmitter;

use crate::error::Md2DocxError;
use crate::model::Document;

/// Sink for a finished document.
///
/// Emitting consumes the emitter and returns whatever it wrapped (a file,
/// an in-memory buffer) so the caller decides what happens next.
pub trait DocumentEmitter {
    type Output;

    fn emit(self, document: &Document) -> Result<Self::Output, Md2DocxError>;
}
