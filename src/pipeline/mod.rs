//! Pipeline stages for Markdown-to-document conversion.
//!
//! Each submodule implements exactly one transformation step, and data flows
//! strictly forward: no stage needs anything from a later one.
//!
//! ## Data Flow
//!
//! ```text
//! postprocess ──▶ repair ──▶ classify ──▶ runs ──▶ build
//!  (page text)    (line)      (line)     (text)   (Document)
//! ```
//!
//! 1. [`postprocess`] — whole-text cleanup of model output (fences, preambles,
//!    invisible characters) before pages are assembled into notes
//! 2. [`repair`]   — per-line removal of stray `**` delimiters
//! 3. [`classify`] — heading / list item / paragraph / blank decision
//! 4. [`runs`]     — split inline text into bold and plain runs
//! 5. [`build`]    — style each line into a [`crate::model::Block`] and collect
//!    the [`crate::model::Document`]

pub mod build;
pub mod classify;
pub mod postprocess;
pub mod repair;
pub mod runs;
