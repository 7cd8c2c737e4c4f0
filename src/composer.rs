//! Line composition and reading-rhythm refinement.
//!
//! The composer walks the clauses once, deciding for each whether it joins
//! the current line or starts a new one. The refiner then folds short,
//! low-content lines back into the line before them.

use std::collections::BTreeSet;

use crate::clause::Clause;

/// A trailing word at least this long ends a line on its own
const STRONG_WORD_LEN: usize = 4;

/// Lines shorter than this may be merged into the previous line
const SHORT_LINE_LEN: usize = 10;

/// Check whether the last whitespace-delimited word is long enough to end a line
pub fn ends_with_strong_word(text: &str) -> bool {
    text.split_whitespace()
        .last()
        .map_or(false, |w| w.chars().count() >= STRONG_WORD_LEN)
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

/// Build candidate lines from clauses and break indices.
///
/// In priority order: a connective clause always joins the current line; a
/// break index or an overflow of `max_length` characters starts a new line;
/// a clause ending in a strong word starts a new line; anything else joins.
pub fn compose(clauses: &[Clause], breaks: &BTreeSet<usize>, max_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for (i, clause) in clauses.iter().enumerate() {
        let text = clause.trimmed();
        let joined_len = if current.is_empty() {
            text.chars().count()
        } else {
            current.chars().count() + 1 + text.chars().count()
        };

        let starts_line = if clause.is_connective() {
            false
        } else if breaks.contains(&i) || joined_len > max_length {
            true
        } else {
            ends_with_strong_word(text)
        };

        if starts_line {
            flush(&mut lines, &mut current);
        } else if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(text);
    }

    flush(&mut lines, &mut current);
    lines
}

/// Merge short lines without a meaningful word into the previous line and
/// join the result with newlines
pub fn refine(lines: &[String]) -> String {
    let mut refined: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        let short = line.chars().count() < SHORT_LINE_LEN;
        let meaningful = line
            .split(' ')
            .any(|w| w.chars().count() >= STRONG_WORD_LEN);

        match refined.last_mut() {
            Some(prev) if short && !meaningful => {
                prev.push(' ');
                prev.push_str(line);
            }
            _ => refined.push(line.clone()),
        }
    }

    refined.join("\n")
}
