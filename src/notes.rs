//! Notes assembly: stitch per-page Markdown into one notes document.
//!
//! Source pages arrive one by one from an upstream producer (a vision model
//! transcribing scanned lecture pages, a directory of exported `.md` files).
//! Each page becomes a `## Page N` section. A page that failed upstream is
//! not dropped: it gets a clearly marked placeholder so the reader can see
//! what is missing, and every other page still makes it into the document.

use crate::config::NotesLayout;
use crate::error::PageError;
use crate::pipeline::postprocess::clean_page_markdown;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// The outcome for one source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Cleaned Markdown. Empty when `error` is set.
    pub markdown: String,
    pub error: Option<PageError>,
}

impl PageResult {
    /// Clean raw page Markdown; a page with nothing left is marked empty.
    pub fn from_markdown(page_num: usize, raw: &str) -> Self {
        let markdown = clean_page_markdown(raw);
        if markdown.is_empty() {
            return Self::failed(page_num, PageError::Empty { page: page_num });
        }
        Self {
            page_num,
            markdown,
            error: None,
        }
    }

    pub fn failed(page_num: usize, error: PageError) -> Self {
        Self {
            page_num,
            markdown: String::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Read each file as one page, numbered in the given order.
///
/// Never fails as a whole: unreadable files become failed pages.
pub fn read_pages<P: AsRef<Path>>(paths: &[P]) -> Vec<PageResult> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let page_num = i + 1;
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(raw) => {
                    debug!("Page {}: read {} bytes from {}", page_num, raw.len(), path.display());
                    PageResult::from_markdown(page_num, &raw)
                }
                Err(e) => {
                    warn!("Page {}: failed to read {}: {}", page_num, path.display(), e);
                    PageResult::failed(
                        page_num,
                        PageError::ReadFailed {
                            page: page_num,
                            detail: format!("{}: {}", path.display(), e),
                        },
                    )
                }
            }
        })
        .collect()
}

/// Assemble the notes Markdown from page results, in page order.
///
/// ```text
/// # Lecture Notes
///
/// ## Page 1
///
/// <page markdown or placeholder>
///
/// ---
/// ```
pub fn assemble_notes(pages: &[PageResult], layout: &NotesLayout) -> String {
    let mut ordered: Vec<&PageResult> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page_num);

    let mut out = format!("# {}\n\n", layout.title);
    for page in ordered {
        out.push_str(&format!("## {}\n\n", layout.page_heading_for(page.page_num)));
        match &page.error {
            None => out.push_str(&page.markdown),
            Some(e) => {
                warn!("Substituting placeholder for page {}: {}", page.page_num, e);
                out.push_str(&layout.placeholder_for(&e.to_string()));
            }
        }
        out.push_str("\n\n");
        if let Some(sep) = layout.separator.line() {
            out.push_str(sep);
            out.push_str("\n\n");
        }
    }
    out
}
