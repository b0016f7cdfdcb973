//! crates/excerpt/src/render/mod.rs
//! Source excerpt rendering for parsed stack frames.

mod style;

use std::fmt;
use std::slice;

use tracing::debug;

use crate::line_reader::{DEFAULT_CHUNK_SIZE, LineReader};
use crate::stack::{CallSkipList, StackFrame};

/// Lines of context shown before the failing line.
pub const LEADING_CONTEXT: usize = 4;

/// Lines of context shown after the failing line.
pub const TRAILING_CONTEXT: usize = 2;

/// Columns added to the widest row number to form the gutter.
pub const GUTTER_PADDING: usize = 2;

/// Returns the gutter width shared by `frames`.
///
/// The width is the digit count of the largest row plus [`GUTTER_PADDING`].
///
/// # Examples
///
/// ```
/// use excerpt::{LineColumn, StackFrame, gutter_width};
///
/// let frames = [
///     StackFrame::new("a", "/a.js", LineColumn::from_parts(7, 1).unwrap()),
///     StackFrame::new("b", "/b.js", LineColumn::from_parts(142, 1).unwrap()),
/// ];
/// assert_eq!(gutter_width(&frames), 5);
/// ```
pub fn gutter_width<'a, I>(frames: I) -> usize
where
    I: IntoIterator<Item = &'a StackFrame>,
{
    let digits = frames
        .into_iter()
        .map(|frame| decimal_digits(frame.line().row()))
        .max()
        .unwrap_or(0);
    digits + GUTTER_PADDING
}

const fn decimal_digits(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// One source line captured in an excerpt window.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExcerptLine {
    /// One-based line number in the source file.
    pub line_number: usize,
    /// The line as read from the file, without styling.
    pub raw_text: String,
}

/// A frame together with its rendered excerpt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedFrame {
    frame: StackFrame,
    excerpt: Vec<ExcerptLine>,
    rendered: String,
}

impl RenderedFrame {
    /// Returns the frame this excerpt was cut for.
    #[must_use]
    pub const fn frame(&self) -> &StackFrame {
        &self.frame
    }

    /// Returns the captured lines, in file order.
    #[must_use]
    pub fn excerpt_lines(&self) -> &[ExcerptLine] {
        &self.excerpt
    }

    /// Returns the styled block: the header line followed by one line per excerpt line.
    #[must_use]
    pub fn rendered_text(&self) -> &str {
        &self.rendered
    }
}

/// Rendered frames of one stack, innermost first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderedStack {
    frames: Vec<RenderedFrame>,
    gutter_width: usize,
}

impl RenderedStack {
    /// Returns the rendered frames.
    #[must_use]
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Returns the gutter width applied to every frame.
    #[must_use]
    pub const fn gutter_width(&self) -> usize {
        self.gutter_width
    }

    /// Returns the number of rendered frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Reports whether no frame could be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates over the rendered frames.
    pub fn iter(&self) -> slice::Iter<'_, RenderedFrame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a RenderedStack {
    type Item = &'a RenderedFrame;
    type IntoIter = slice::Iter<'a, RenderedFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for RenderedStack {
    type Item = RenderedFrame;
    type IntoIter = std::vec::IntoIter<RenderedFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl fmt::Display for RenderedStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, frame) in self.frames.iter().enumerate() {
            if index > 0 {
                f.write_str("\n\n")?;
            }
            f.write_str(&frame.rendered)?;
        }
        Ok(())
    }
}

/// Cuts and styles source excerpts for a batch of frames.
///
/// # Examples
///
/// ```
/// use excerpt::{CallSkipList, Renderer, parse_raw_stack};
///
/// let frames = parse_raw_stack("    at main (/definitely/not/here.rs:3:1)");
/// let rendered = Renderer::new()
///     .with_skip_calls(CallSkipList::new())
///     .render(&frames);
///
/// // Missing sources are dropped without an error.
/// assert!(rendered.is_empty());
/// assert_eq!(rendered.gutter_width(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    skip_calls: CallSkipList,
    chunk_size: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer that hides no frames.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip_calls: CallSkipList::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Hides frames whose call site matches `skip_calls`.
    #[must_use]
    pub fn with_skip_calls(mut self, skip_calls: CallSkipList) -> Self {
        self.skip_calls = skip_calls;
        self
    }

    /// Overrides the chunk size used to read sources.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Renders every frame not hidden by the call skip-list.
    ///
    /// The gutter width is computed over the frames that survive the call
    /// skip-list, before missing sources are dropped.
    #[must_use]
    pub fn render(&self, frames: &[StackFrame]) -> RenderedStack {
        let retained: Vec<&StackFrame> = frames
            .iter()
            .filter(|frame| !self.skip_calls.matches(frame.call_site()))
            .collect();
        let width = gutter_width(retained.iter().copied());

        let frames = retained
            .into_iter()
            .filter_map(|frame| self.render_frame(frame, width))
            .collect();

        RenderedStack {
            frames,
            gutter_width: width,
        }
    }

    fn render_frame(&self, frame: &StackFrame, width: usize) -> Option<RenderedFrame> {
        let path = frame.source_file();
        if !path.is_file() {
            debug!(path = %path.display(), "source not found, dropping frame");
            return None;
        }

        let reader = match LineReader::with_chunk_size(path, self.chunk_size) {
            Ok(reader) => reader,
            Err(error) => {
                debug!(%error, "cannot open source, dropping frame");
                return None;
            }
        };

        let failing = frame.line().row_index();
        let first = failing.saturating_sub(LEADING_CONTEXT);
        let last = failing.saturating_add(TRAILING_CONTEXT);

        let mut excerpt = Vec::with_capacity(LEADING_CONTEXT + TRAILING_CONTEXT + 1);
        for (index, line) in reader.enumerate().take(last.saturating_add(1)) {
            let text = match line {
                Ok(text) => text,
                Err(error) => {
                    debug!(path = %path.display(), %error, "source read failed, dropping frame");
                    return None;
                }
            };
            if index >= first {
                excerpt.push(ExcerptLine {
                    line_number: index + 1,
                    raw_text: text,
                });
            }
        }

        let mut rendered = style::header(&format!(
            "[{}][{}][{}]",
            path.display(),
            frame.line().row(),
            frame.line().column()
        ));
        for line in &excerpt {
            let is_failing = line.line_number == failing + 1;
            let body = if is_failing {
                style::failing_line(&line.raw_text, frame.line().column())
            } else {
                style::dim_comments(&line.raw_text)
            };
            rendered.push('\n');
            rendered.push_str(&style::gutter(line.line_number, width, is_failing));
            rendered.push_str(&body);
        }

        Some(RenderedFrame {
            frame: frame.clone(),
            excerpt,
            rendered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::LineColumn;

    fn frame(row: usize) -> StackFrame {
        StackFrame::new("f", "/x.rs", LineColumn::from_parts(row, 1).expect("non-zero"))
    }

    #[test]
    fn digits_are_counted_in_base_ten() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(142), 3);
        assert_eq!(decimal_digits(100_000), 6);
    }

    #[test]
    fn gutter_width_uses_widest_row() {
        let frames = [frame(7), frame(142)];
        assert_eq!(gutter_width(&frames), 5);
    }

    #[test]
    fn gutter_width_of_nothing_is_padding() {
        assert_eq!(gutter_width(&[] as &[StackFrame]), GUTTER_PADDING);
    }

    #[test]
    fn skipped_calls_do_not_widen_gutter() {
        let frames = [
            frame(3),
            StackFrame::new("hidden", "/x.rs", LineColumn::from_parts(10_000, 1).expect("non-zero")),
        ];
        let skip: CallSkipList = ["hidden"].into_iter().collect();
        let rendered = Renderer::new().with_skip_calls(skip).render(&frames);
        assert_eq!(rendered.gutter_width(), 3);
    }
}
