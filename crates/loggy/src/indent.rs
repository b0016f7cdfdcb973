//! Leading `%N%` indent directive.
//!
//! A message may start with `%N%` where `N` is a decimal level count. The
//! marker is removed and the message is indented by `N` levels. Only the very
//! start of the message is inspected; markers elsewhere are ordinary text.

/// Largest level count a marker may carry; larger markers are ordinary text.
pub const MAX_INDENT_LEVELS: usize = 64;

/// Widest whitespace prefix [`indentation`] produces.
pub const MAX_INDENT_WIDTH: usize = 256;

/// Splits a leading `%N%` marker off `message`.
///
/// Returns the level count (zero when no marker is present) and the rest of
/// the message.
///
/// # Examples
///
/// ```
/// use loggy::split_indent;
///
/// assert_eq!(split_indent("%2%nested"), (2, "nested"));
/// assert_eq!(split_indent("plain %1%"), (0, "plain %1%"));
/// ```
#[must_use]
pub fn split_indent(message: &str) -> (usize, &str) {
    let Some(rest) = message.strip_prefix('%') else {
        return (0, message);
    };
    let Some(end) = rest.find('%') else {
        return (0, message);
    };
    let digits = &rest[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (0, message);
    }
    match digits.parse::<usize>() {
        Ok(levels) if levels <= MAX_INDENT_LEVELS => (levels, &rest[end + 1..]),
        _ => (0, message),
    }
}

/// Returns the whitespace prefix for `levels` levels of `spaces` each.
///
/// The width is capped at [`MAX_INDENT_WIDTH`].
#[must_use]
pub fn indentation(levels: usize, spaces: usize) -> String {
    " ".repeat(levels.saturating_mul(spaces).min(MAX_INDENT_WIDTH))
}
