use super::MessageSink;
use crate::line_mode::LineMode;
use std::io::{self, Write};

impl<W> MessageSink<W>
where
    W: Write,
{
    /// Writes a single entry using the sink's current [`LineMode`].
    pub fn write(&mut self, entry: impl AsRef<str>) -> io::Result<()> {
        self.write_with_mode(entry, self.line_mode)
    }

    /// Writes `entry` using an explicit [`LineMode`] without mutating the sink.
    pub fn write_with_mode(&mut self, entry: impl AsRef<str>, line_mode: LineMode) -> io::Result<()> {
        self.writer.write_all(entry.as_ref().as_bytes())?;
        self.writer.write_all(line_mode.terminator())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
