use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn escape_sequence() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("escape sequence pattern is valid")
    })
}

/// Removes ANSI CSI escape sequences (colors, cursor movement) from `text`.
///
/// Text without escapes is returned borrowed.
///
/// # Examples
///
/// ```
/// use logging_sink::strip_ansi;
///
/// assert_eq!(strip_ansi("\u{1b}[31m[x]\u{1b}[0m failed"), "[x] failed");
/// assert_eq!(strip_ansi("plain"), "plain");
/// ```
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\u{1b}') {
        return Cow::Borrowed(text);
    }
    escape_sequence().replace_all(text, "")
}
