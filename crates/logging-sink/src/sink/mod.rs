use std::fmt;

use crate::line_mode::LineMode;

mod writing;

/// Streaming sink that writes formatted entries into an [`std::io::Write`] target.
///
/// The sink owns the writer and the [`LineMode`] used to terminate entries.
/// Individual writes may override the mode without mutating the sink, which
/// is how the spinner redraws its frame in place between regular entries.
///
/// # Examples
///
/// ```
/// use logging_sink::{LineMode, MessageSink};
///
/// let mut output = Vec::new();
/// let mut sink = MessageSink::with_line_mode(&mut output, LineMode::WithCrlf);
/// sink.write("first")?;
/// sink.write("second")?;
/// drop(sink);
///
/// assert_eq!(output, b"first\r\nsecond\r\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct MessageSink<W> {
    writer: W,
    line_mode: LineMode,
}

impl<W> MessageSink<W> {
    /// Creates a sink that appends `\n` after each entry.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self { writer, line_mode }
    }
}

impl<W> fmt::Debug for MessageSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSink")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .finish()
    }
}
