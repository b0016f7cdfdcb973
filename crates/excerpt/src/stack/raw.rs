//! crates/excerpt/src/stack/raw.rs
//! Textual stack parsing.
//!
//! Two layouts are recognised, one frame per entry:
//!
//! - `[at ]name (path:row:col)`, where `name` is an identifier-like token
//!   (letters, digits, `.`, `<`, `>`, `_`, `-`, `:`, optionally preceded by
//!   `new `).
//! - The native `std::backtrace::Backtrace` layout, `N: symbol` followed by an
//!   indented `at path:row:col` line.
//!
//! Anything else is kept as text so the stack can be re-rendered, but never
//! yields a [`StackFrame`].

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::frame::{LineColumn, StackFrame};

fn inline_frame() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?:at\s+)?(?P<call>(?:new\s+)?[\w.<>:\-]+)\s+\((?P<location>[^()]+)\)\s*$")
            .expect("inline frame pattern is valid")
    })
}

fn native_header() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\d+:\s+(?P<call>\S.*?)\s*$").expect("native header pattern is valid")
    })
}

fn native_location() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*at\s+(?P<location>[^()]+?)\s*$").expect("native location pattern is valid")
    })
}

fn location_parts() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<file>.+):(?P<row>\d+):(?P<column>\d+)$")
            .expect("location pattern is valid")
    })
}

/// Splits `path:row:col` on its last two numeric fields.
fn parse_location(location: &str) -> Option<(PathBuf, LineColumn)> {
    let captures = location_parts().captures(location.trim())?;
    let row = captures["row"].parse().ok()?;
    let column = captures["column"].parse().ok()?;
    let line = LineColumn::from_parts(row, column)?;
    Some((PathBuf::from(&captures["file"]), line))
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RawEntry {
    text: String,
    frame_like: bool,
    frame: Option<StackFrame>,
}

impl RawEntry {
    const fn text(text: String) -> Self {
        Self {
            text,
            frame_like: false,
            frame: None,
        }
    }
}

/// A raw stack split into per-frame entries.
///
/// Parsing never fails. Lines that do not look like frames (the failure
/// message, `<unknown>` frames, frames without a location) are retained as
/// text so [`Display`](fmt::Display) reproduces the stack, while
/// [`frames`](Self::frames) only returns entries with a complete location.
///
/// # Examples
///
/// ```
/// use excerpt::RawStack;
///
/// let raw = RawStack::parse(
///     "   0: app::config::load\n             at ./src/config.rs:41:9\n   1: app::main\n             at ./src/main.rs:7:5",
/// );
///
/// assert_eq!(raw.frame_count(), 2);
/// let frames = raw.frames();
/// assert_eq!(frames[0].call_site(), "app::config::load");
/// assert_eq!(frames[0].line().row(), 41);
///
/// let trimmed = raw.skip_frames(1);
/// assert_eq!(trimmed.frames()[0].call_site(), "app::main");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawStack {
    entries: Vec<RawEntry>,
}

impl RawStack {
    /// Parses a raw stack text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries: Vec<RawEntry> = Vec::new();
        let mut awaiting_location: Option<String> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(call_site) = awaiting_location.take() {
                if let Some(captures) = native_location().captures(line) {
                    if let Some(entry) = entries.last_mut() {
                        entry.text.push('\n');
                        entry.text.push_str(line);
                        entry.frame = parse_location(&captures["location"])
                            .map(|(file, line)| StackFrame::new(call_site, file, line));
                    }
                    continue;
                }
            }

            if let Some(captures) = inline_frame().captures(line) {
                let frame = parse_location(&captures["location"])
                    .map(|(file, location)| StackFrame::new(&captures["call"], file, location));
                if frame.is_none() {
                    trace!(entry = line, "stack entry without a usable location");
                }
                entries.push(RawEntry {
                    text: line.to_owned(),
                    frame_like: true,
                    frame,
                });
            } else if let Some(captures) = native_header().captures(line) {
                awaiting_location = Some(captures["call"].to_owned());
                entries.push(RawEntry {
                    text: line.to_owned(),
                    frame_like: true,
                    frame: None,
                });
            } else {
                trace!(entry = line, "skipping non-frame stack line");
                entries.push(RawEntry::text(line.to_owned()));
            }
        }

        Self { entries }
    }

    /// Returns the frames with a complete location, innermost first.
    #[must_use]
    pub fn frames(&self) -> Vec<StackFrame> {
        self.entries
            .iter()
            .filter_map(|entry| entry.frame.clone())
            .collect()
    }

    /// Consumes the stack and returns its frames, innermost first.
    #[must_use]
    pub fn into_frames(self) -> Vec<StackFrame> {
        self.entries
            .into_iter()
            .filter_map(|entry| entry.frame)
            .collect()
    }

    /// Returns how many entries look like frames, including ones without a usable location.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.frame_like).count()
    }

    /// Reports whether the stack holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy without the first `count` frame entries.
    ///
    /// Text entries such as the message line are kept in place.
    #[must_use]
    pub fn skip_frames(&self, count: usize) -> Self {
        let mut skipped = 0;
        let entries = self
            .entries
            .iter()
            .filter(|entry| {
                if entry.frame_like && skipped < count {
                    skipped += 1;
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        Self { entries }
    }
}

impl fmt::Display for RawStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&entry.text)?;
        }
        Ok(())
    }
}

/// Recovers [`StackFrame`] values from a raw stack text.
///
/// Malformed entries are skipped; the result preserves stack order.
#[must_use]
pub fn parse_raw_stack(text: &str) -> Vec<StackFrame> {
    RawStack::parse(text).into_frames()
}
