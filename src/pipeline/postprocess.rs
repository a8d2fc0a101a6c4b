//! Post-processing: deterministic cleanup of model-generated page Markdown.
//!
//! A vision model asked for "clean markdown" still wraps its answer in a
//! ```` ```markdown ```` fence now and then, opens with a chatty sentence
//! announcing the notes, or leaks zero-width characters. None of that belongs
//! in the document, so every page runs through these rules before it is
//! assembled into notes.
//!
//! ## Rule Order
//!
//! Line endings are normalised first so the fence and preamble rules only
//! ever see `\n`; per-line trimming runs after the preamble is gone so the
//! remaining text starts cleanly.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all post-processing rules to one page of model output.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF/CR → LF)
/// 2. Strip an outer markdown fence wrapping the whole text
/// 3. Remove a known model preamble sentence at the start
/// 4. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 5. Trim trailing whitespace per line
/// 6. Trim surrounding blank lines
pub fn clean_page_markdown(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = strip_markdown_fences(&s);
    let s = strip_model_preamble(&s);
    let s = remove_invisible_chars(&s);
    let s = trim_trailing_whitespace(&s);
    trim_blank_edges(&s).to_string()
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Strip outer markdown fences ──────────────────────────────────────

static RE_WHOLE_PAGE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A```(?:markdown|md|Markdown)?[ \t]*\n(?P<body>.*?)\n?```\z").unwrap()
});

fn strip_markdown_fences(input: &str) -> String {
    match RE_WHOLE_PAGE_FENCE.captures(input.trim()) {
        Some(caps) => caps["body"].trim().to_string(),
        None => input.to_string(),
    }
}

// ── Rule 3: Remove model preamble ────────────────────────────────────────────

/// Opening sentences models put in front of the notes they were asked for.
const MODEL_PREAMBLES: [&str; 3] = [
    "Okay, here are the processed lecture notes, based on the OCR output and image, formatted in Markdown:",
    "Here are the processed lecture notes based on the OCR output and image, formatted in Markdown:",
    "Here are the lecture notes formatted in Markdown:",
];

fn strip_model_preamble(input: &str) -> String {
    let trimmed = input.trim_start();
    MODEL_PREAMBLES
        .iter()
        .find_map(|preamble| trimmed.strip_prefix(preamble))
        .map(|rest| rest.trim_start().to_string())
        .unwrap_or_else(|| input.to_string())
}

// ── Rule 4: Remove invisible Unicode characters ─────────────────────────────

/// Zero-width space, BOM, soft hyphen, ZWNJ, ZWJ, word joiner.
const INVISIBLE: [char; 6] = [
    '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
];

fn remove_invisible_chars(input: &str) -> String {
    input.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

// ── Rule 5: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }
    out
}

// ── Rule 6: Trim surrounding blank lines ─────────────────────────────────────

fn trim_blank_edges(input: &str) -> &str {
    input.trim_matches('\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```markdown\n# Krebs cycle\n* Acetyl-CoA\n```")]
    #[case("```md\n# Krebs cycle\n* Acetyl-CoA\n```")]
    #[case("```\n# Krebs cycle\n* Acetyl-CoA\n```")]
    #[case("\n```markdown  \n# Krebs cycle\n* Acetyl-CoA```\n")]
    fn whole_page_fence_is_removed(#[case] input: &str) {
        assert_eq!(strip_markdown_fences(input), "# Krebs cycle\n* Acetyl-CoA");
    }

    #[test]
    fn inner_code_fence_is_kept() {
        let input = "# Sorting\n```\nfn main() {}\n```\nQuicksort is O(n log n).";
        assert_eq!(strip_markdown_fences(input), input);
    }

    #[test]
    fn mixed_line_endings_become_lf() {
        assert_eq!(normalise_line_endings("# A\r\n* b\r* c\n"), "# A\n* b\n* c\n");
        assert_eq!(normalise_line_endings("plain\n"), "plain\n");
    }

    #[test]
    fn known_preamble_is_dropped() {
        let input = "Here are the lecture notes formatted in Markdown:\n\n## Osmosis\n- water moves";
        assert_eq!(strip_model_preamble(input), "## Osmosis\n- water moves");
    }

    #[test]
    fn preamble_text_later_in_page_is_content() {
        let input = "## Quotes\nHere are the lecture notes formatted in Markdown:";
        assert_eq!(strip_model_preamble(input), input);
    }

    #[test]
    fn invisible_chars_are_stripped() {
        assert_eq!(
            remove_invisible_chars("\u{FEFF}mito\u{00AD}chon\u{200B}dria\u{2060}"),
            "mitochondria"
        );
    }

    #[test]
    fn trailing_whitespace_goes_leading_indent_stays() {
        assert_eq!(
            trim_trailing_whitespace("* parent \t\n    * child   \n"),
            "* parent\n    * child\n"
        );
    }

    #[test]
    fn full_page_cleanup() {
        let input = "```markdown\r\nOkay, here are the processed lecture notes, based on the OCR output and image, formatted in Markdown:\r\n\r\n# Enzymes  \r\n* **Km:** affinity\u{200B}\r\n```";
        assert_eq!(clean_page_markdown(input), "# Enzymes\n* **Km:** affinity");
    }

    #[test]
    fn whitespace_only_page_cleans_to_nothing() {
        assert_eq!(clean_page_markdown(" \t\n\r\n  "), "");
    }
}
