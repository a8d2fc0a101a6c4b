//! Line classification: decide which block a repaired line starts.
//!
//! Only prefixes are inspected and the first matching rule wins, so a
//! heading line can never also be a list item.

/// What a single line of the dialect turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# `, `## ` or `### ` prefix; `text` follows the prefix.
    Heading { level: u8, text: &'a str },
    /// `* ` or `- ` marker after `indent` leading spaces; `text` follows the
    /// marker with leading whitespace removed.
    ListItem { indent: usize, text: &'a str },
    /// Any other non-empty line, verbatim.
    Paragraph(&'a str),
    /// Whitespace-only line.
    Blank,
}

const HEADING_PREFIXES: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];
const LIST_MARKERS: [&str; 2] = ["* ", "- "];

/// Classify one line. Trailing whitespace is ignored.
///
/// A list marker counts only when it is preceded by at most
/// `max_marker_indent` spaces; deeper markers fall through to paragraph text.
pub fn classify_line(line: &str, max_marker_indent: usize) -> LineKind<'_> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return LineKind::Blank;
    }

    for (prefix, level) in HEADING_PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            return LineKind::Heading { level, text };
        }
    }

    let body = line.trim_start_matches(' ');
    let indent = line.len() - body.len();
    if indent <= max_marker_indent {
        for marker in LIST_MARKERS {
            if let Some(text) = body.strip_prefix(marker) {
                return LineKind::ListItem {
                    indent,
                    text: text.trim_start(),
                };
            }
        }
    }

    LineKind::Paragraph(line)
}
