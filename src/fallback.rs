//! Plain length-based wrapping, used when the semantic formatter fails.

use crate::formatter::strip_line_break_markup;

/// Greedily pack whitespace-separated words into lines of at most
/// `max_length` characters. A single word longer than the limit gets its own
/// line.
pub fn wrap_by_length(text: &str, max_length: usize) -> String {
    let clean = strip_line_break_markup(text);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in clean.split_whitespace() {
        let joined_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if joined_len > max_length && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        } else if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
