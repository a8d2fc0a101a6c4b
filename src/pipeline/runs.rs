//! Inline run splitting: turn `**bold**` spans into styled runs.
//!
//! The scan is left to right and non-greedy: each `**` opens a span that the
//! next `**` closes. Text between spans becomes plain runs. Whatever follows
//! the last complete span has its leftover delimiters stripped, so a run
//! never carries an unmatched `**`.

use crate::model::Run;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

const DELIMITER: &str = "**";

/// Split `text` into runs of `size_pt`.
///
/// Empty pieces are skipped and adjacent runs with the same emphasis are
/// merged, so an empty input yields no runs at all.
pub fn split_runs(text: &str, size_pt: f32) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut last_end = 0;

    for caps in RE_BOLD_SPAN.captures_iter(text) {
        let span = caps.get_match();
        push_run(&mut runs, &text[last_end..span.start()], false, size_pt);
        push_run(&mut runs, &caps[1], true, size_pt);
        last_end = span.end();
    }

    let rest = text[last_end..].replace(DELIMITER, "");
    push_run(&mut runs, &rest, false, size_pt);
    runs
}

/// Split `text` and mark every run bold, as heading styles require.
pub fn split_runs_bold(text: &str, size_pt: f32) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for run in split_runs(text, size_pt) {
        push_run(&mut runs, &run.text, true, size_pt);
    }
    runs
}

fn push_run(runs: &mut Vec<Run>, text: &str, bold: bool, size_pt: f32) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => runs.push(Run {
            text: text.to_string(),
            bold,
            size_pt,
        }),
    }
}
