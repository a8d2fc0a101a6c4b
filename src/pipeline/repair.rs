//! Asterisk repair: drop stray `**` delimiters from model-generated lines.
//!
//! Language models tend to close a bold label one token too late
//! (`Label:** text`) or leave a lone `**` dangling at the end of a line.
//! Rendering those verbatim would either print literal asterisks or bold half
//! a sentence, so each line passes through a small set of textual rewrites
//! before it is classified and split into runs.
//!
//! ## Rule Order
//!
//! 1. `: ** ` → `: `      delimiter after a colon, before whitespace
//! 2. `:**` at EOL → `:`  delimiter after a colon at end of line
//! 3. `:**"` → `:"`       delimiter between a colon and a quote
//! 4. `**` at EOL → ``    trailing unmatched delimiter
//! 5. `:**W` → `:W`       delimiter between a colon and a letter
//!
//! A sixth rule guards a legitimate bold label such as `**Label:**`: no
//! rewrite may touch a delimiter inside such a span, so the label stays bold
//! even though its closing `:**` looks exactly like rules 1, 2, 3 and 5.
//! A span opened by a `:**` artifact is not a label and gets no protection.
//!
//! The rules only ever delete delimiters, and [`repair_line`] reapplies them
//! until the line stops changing, which makes the repair idempotent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// One ordered text rewrite.
pub struct RepairRule {
    pub name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

impl RepairRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Apply this rule once across the whole line, skipping bold-label spans.
    pub fn apply(&self, line: &str) -> String {
        let protected = bold_label_spans(line);
        self.regex
            .replace_all(line, |caps: &Captures<'_>| {
                let whole = caps.get_match();
                if overlaps_any(whole.range(), &protected) {
                    whole.as_str().to_string()
                } else {
                    let mut out = String::new();
                    caps.expand(self.replacement, &mut out);
                    out
                }
            })
            .into_owned()
    }
}

static REPAIR_RULES: Lazy<[RepairRule; 5]> = Lazy::new(|| {
    [
        RepairRule::new("colon-space", r":\*\*(\s)", ":${1}"),
        RepairRule::new("colon-eol", r":\*\*$", ":"),
        RepairRule::new("colon-quote", r#":\*\*""#, r#":""#),
        RepairRule::new("trailing", r"\*\*$", ""),
        RepairRule::new("colon-letter", r":\*\*([A-Za-z])", ":${1}"),
    ]
});

// ── Rule 6: bold labels are off limits ───────────────────────────────────────

static RE_BOLD_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^*]*?:\*\*").unwrap());

/// Byte ranges of `**Label:**` spans in `line`.
///
/// A candidate whose opening `**` directly follows a colon is itself an
/// artifact (`Term:** def. Other:** more`), not the start of a label.
fn bold_label_spans(line: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut at = 0;
    while let Some(m) = RE_BOLD_LABEL.find_at(line, at) {
        if line[..m.start()].ends_with(':') {
            at = m.start() + 2;
            continue;
        }
        spans.push(m.range());
        at = m.end();
    }
    spans
}

fn overlaps_any(range: Range<usize>, spans: &[Range<usize>]) -> bool {
    spans
        .iter()
        .any(|s| range.start < s.end && s.start < range.end)
}

/// The ordered rewrite rules, for inspection and diagnostics.
pub fn rules() -> &'static [RepairRule] {
    REPAIR_RULES.as_slice()
}

/// Repair one raw line.
///
/// Applies every rule in order, repeating the pass until the line no longer
/// changes. Each effective rewrite removes a delimiter, so the loop runs at
/// most `line.len() / 2 + 1` times.
pub fn repair_line(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = rules()
            .iter()
            .fold(current.clone(), |acc, rule| rule.apply(&acc));
        if next == current {
            return current;
        }
        current = next;
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static RepairRule {
        rules().iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["colon-space", "colon-eol", "colon-quote", "trailing", "colon-letter"]
        );
    }

    #[test]
    fn test_colon_space() {
        assert_eq!(rule("colon-space").apply("Label:** value"), "Label: value");
        assert_eq!(rule("colon-space").apply("a:**\tb"), "a:\tb");
    }

    #[test]
    fn test_colon_eol() {
        assert_eq!(rule("colon-eol").apply("Definition:**"), "Definition:");
        assert_eq!(rule("colon-eol").apply("a:** b"), "a:** b");
    }

    #[test]
    fn test_colon_quote() {
        assert_eq!(
            rule("colon-quote").apply(r#"He said:**"hello""#),
            r#"He said:"hello""#
        );
    }

    #[test]
    fn test_trailing() {
        assert_eq!(rule("trailing").apply("dangling text**"), "dangling text");
        assert_eq!(rule("trailing").apply("**mid** text"), "**mid** text");
    }

    #[test]
    fn test_colon_letter() {
        assert_eq!(rule("colon-letter").apply("Term:**Definition"), "Term:Definition");
        assert_eq!(rule("colon-letter").apply("Term:**1"), "Term:**1");
    }

    #[test]
    fn test_bold_label_survives_every_rule() {
        for line in ["**Label:** value", "**Label:**", "**Label:**Word", r#"**Q:**"x""#] {
            for r in rules() {
                assert_eq!(r.apply(line), line, "rule {} altered {line:?}", r.name);
            }
            assert_eq!(repair_line(line), line);
        }
    }

    #[test]
    fn test_every_artifact_on_a_line_is_repaired() {
        assert_eq!(
            rule("colon-space").apply("Term:** def. Other:** more"),
            "Term: def. Other: more"
        );
        assert_eq!(rule("colon-letter").apply("A:**b and C:**d"), "A:b and C:d");
        assert_eq!(rule("colon-eol").apply("Label: value:**"), "Label: value:");
        assert_eq!(repair_line("Term:** def. Other:** more"), "Term: def. Other: more");
        assert_eq!(repair_line("Label:** value:**"), "Label: value:");
        assert_eq!(repair_line(r#"Said:**"yes" then:**"#), r#"Said:"yes" then:"#);
    }

    #[test]
    fn test_label_and_artifact_share_a_line() {
        let cases = [
            ("**Key:** value. Note:** more", "**Key:** value. Note: more"),
            ("Term:** def **Key:** value", "Term: def **Key:** value"),
            ("**Key:** a, b:**", "**Key:** a, b:"),
        ];
        for (line, want) in cases {
            assert_eq!(repair_line(line), want, "for {line:?}");
        }
        assert_eq!(
            rule("colon-space").apply("**Key:** value. Note:** more"),
            "**Key:** value. Note: more"
        );
    }

    #[test]
    fn test_stray_delimiter_next_to_label_is_removed() {
        assert_eq!(
            repair_line("Answer:** **Key:** value"),
            "Answer: **Key:** value"
        );
    }

    #[test]
    fn test_paired_bold_untouched() {
        assert_eq!(repair_line("Some **bold** word."), "Some **bold** word.");
    }

    #[test]
    fn test_repeated_trailing_delimiters() {
        assert_eq!(repair_line("text****"), "text");
        assert_eq!(repair_line("Note:****"), "Note:");
    }

    #[test]
    fn test_idempotent() {
        let corpus = [
            "",
            "plain line",
            "Label:** value",
            "**Label:** value",
            "**Label:**",
            "Note:**",
            "Note:****",
            "a:*****",
            r#"Quote:**"text"**"#,
            "Term:**Word and more**",
            "**a:**:** b",
            "x:** y **z:**",
            "****",
            "**",
            "*",
            "* **Key concept:** explanation",
            "    - nested:**item**",
            "A**B**C",
            "**unclosed",
            "ends with colon:** ",
            "Term:** def. Other:** more",
            "Label:** value:**",
            "**Key:** value. Note:** more",
            "A:**b and C:**d",
        ];
        for line in corpus {
            let once = repair_line(line);
            let twice = repair_line(&once);
            assert_eq!(once, twice, "not idempotent for {line:?}");
        }
    }
}
