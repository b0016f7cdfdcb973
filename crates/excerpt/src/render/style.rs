//! Terminal styling for excerpt blocks.

use std::sync::OnceLock;

use colored::Colorize;
use regex::{Captures, Regex};

fn block_comment() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/\*.*?\*/").expect("block comment pattern is valid"))
}

fn line_comment() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<indent>\s*)(?P<comment>//.*)$").expect("line comment pattern is valid")
    })
}

pub(super) fn header(text: &str) -> String {
    text.cyan().to_string()
}

pub(super) fn gutter(line_number: usize, width: usize, failing: bool) -> String {
    let padded = format!("{line_number:<width$}");
    if failing {
        padded.red().bold().to_string()
    } else {
        padded.bright_black().to_string()
    }
}

/// Highlights `text` from the one-based character `column` to the end of the line.
pub(super) fn failing_line(text: &str, column: usize) -> String {
    let split = text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(offset, _)| offset);
    let (head, tail) = text.split_at(split);
    if tail.is_empty() {
        return head.to_owned();
    }
    format!("{head}{}", tail.red().bold())
}

/// Dims `/* ... */` and whole-line `//` comments.
///
/// Comment markers inside string literals are dimmed as well.
pub(super) fn dim_comments(text: &str) -> String {
    if let Some(captures) = line_comment().captures(text) {
        return format!("{}{}", &captures["indent"], captures["comment"].dimmed());
    }
    block_comment()
        .replace_all(text, |captures: &Captures<'_>| captures[0].dimmed().to_string())
        .into_owned()
}
