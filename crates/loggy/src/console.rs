//! crates/loggy/src/console.rs
//! Shared console writer used by the logger and its spinners.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging_sink::{LineMode, MessageSink};

/// Clears the current terminal line and returns the cursor to column zero.
const CLEAR_LINE: &str = "\r\u{1b}[2K";

type BoxedWriter = Box<dyn Write + Send>;

/// Cloneable handle to the console sink.
///
/// Clones share one writer behind a mutex, so entries from the logger and
/// frames from a spinner thread never interleave within a line.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<MessageSink<BoxedWriter>>>,
}

impl Console {
    /// Console writing to `writer`.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let writer: BoxedWriter = Box::new(writer);
        Self {
            sink: Arc::new(Mutex::new(MessageSink::new(writer))),
        }
    }

    /// Console writing to the process standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn lock(&self) -> MutexGuard<'_, MessageSink<BoxedWriter>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `entry` followed by a newline.
    pub fn write_line(&self, entry: &str) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write(entry)?;
        sink.flush()
    }

    /// Replaces the current line with `frame` without terminating it.
    pub fn redraw(&self, frame: &str) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write_with_mode(CLEAR_LINE, LineMode::WithoutNewline)?;
        sink.write_with_mode(frame, LineMode::WithoutNewline)?;
        sink.flush()
    }

    /// Erases the current line.
    pub fn clear_line(&self) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write_with_mode(CLEAR_LINE, LineMode::WithoutNewline)?;
        sink.flush()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// In-memory writer whose contents stay readable after being handed to a [`Console`].
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything written so far, decoded lossily.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
