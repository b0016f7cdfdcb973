//! crates/excerpt/src/line_reader.rs
//! Chunked, pull-based line iteration over a file.

use std::fs::{self, File};
use std::io::{self, Read};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use memchr::memchr;

use crate::error::ReadError;

/// Number of bytes requested from the file per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Whether the platform line ending is `\r\n`.
const STRIP_CARRIAGE_RETURN: bool = cfg!(windows);

/// Lazily yields the lines of a file.
///
/// The reader owns a chunk buffer that grows by at most one chunk beyond the
/// longest line. Each call to [`next`](Iterator::next) scans the buffered bytes
/// for `\n`, yields the line in front of it, and discards the consumed prefix
/// before the next chunk is appended. A final line without a terminator is
/// yielded once the file is exhausted. Invalid UTF-8 is replaced lossily.
///
/// The iterator is not restartable; open a new reader to read the file again.
///
/// # Examples
///
/// ```no_run
/// use excerpt::LineReader;
///
/// for line in LineReader::open("src/main.rs")? {
///     println!("{}", line?);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct LineReader {
    path: PathBuf,
    file: Option<File>,
    chunk_size: usize,
    buffer: Vec<u8>,
    start: usize,
    /// Bytes after `start` already known to hold no `\n`.
    scanned: usize,
}

impl LineReader {
    /// Opens `path` with the [`DEFAULT_CHUNK_SIZE`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    /// Opens `path`, reading `chunk_size` bytes at a time.
    ///
    /// Existence is checked once, before any byte is read. A `chunk_size` of
    /// zero is treated as one byte.
    pub fn with_chunk_size(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self, ReadError> {
        let path = path.as_ref();
        fs::metadata(path).map_err(|source| ReadError::io(path, source))?;
        let file = File::open(path).map_err(|source| ReadError::io(path, source))?;
        let chunk_size = chunk_size.max(1);

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            chunk_size,
            buffer: Vec::with_capacity(chunk_size),
            start: 0,
            scanned: 0,
        })
    }

    /// Returns the path this reader was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configured chunk size in bytes.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn take_line(&mut self) -> Option<String> {
        let pending = &self.buffer[self.start..];
        let Some(offset) = memchr(b'\n', &pending[self.scanned..]) else {
            self.scanned = pending.len();
            return None;
        };
        let newline = self.scanned + offset;

        let mut end = newline;
        if STRIP_CARRIAGE_RETURN && end > 0 && pending[end - 1] == b'\r' {
            end -= 1;
        }

        let line = String::from_utf8_lossy(&pending[..end]).into_owned();
        self.start += newline + 1;
        self.scanned = 0;
        Some(line)
    }

    fn take_remainder(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.start >= self.buffer.len() {
            self.buffer.clear();
            self.start = 0;
            return None;
        }

        let line = String::from_utf8_lossy(&self.buffer[self.start..]).into_owned();
        self.buffer.clear();
        self.start = 0;
        Some(line)
    }

    /// Appends one chunk to the buffer, returning `false` once the file is exhausted.
    fn fill(&mut self) -> io::Result<bool> {
        let Some(file) = self.file.as_mut() else {
            return Ok(false);
        };

        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.start = 0;
        }

        let filled = self.buffer.len();
        self.buffer.resize(filled + self.chunk_size, 0);

        let read = loop {
            match file.read(&mut self.buffer[filled..]) {
                Ok(read) => break read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => {
                    self.buffer.clear();
                    self.scanned = 0;
                    self.file = None;
                    return Err(error);
                }
            }
        };

        self.buffer.truncate(filled + read);
        if read == 0 {
            self.file = None;
            return Ok(false);
        }
        Ok(true)
    }
}

impl Iterator for LineReader {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.take_line() {
                return Some(Ok(line));
            }

            match self.fill() {
                Ok(true) => {}
                Ok(false) => return self.take_remainder().map(Ok),
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

impl FusedIterator for LineReader {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents).expect("write contents");
        file.flush().expect("flush");
        file
    }

    fn collect(reader: LineReader) -> Vec<String> {
        reader.map(|line| line.expect("line")).collect()
    }

    #[test]
    fn missing_path_fails_eagerly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.rs");
        let error = LineReader::open(&missing).expect_err("missing file must fail");
        assert!(matches!(error, ReadError::NotFound { .. }));
        assert_eq!(error.path(), missing.as_path());
    }

    #[test]
    fn empty_file_yields_nothing() {
        let file = file_with(b"");
        let reader = LineReader::open(file.path()).expect("open");
        assert!(collect(reader).is_empty());
    }

    #[test]
    fn trailing_newline_does_not_add_empty_line() {
        let file = file_with(b"alpha\nbeta\n");
        let reader = LineReader::open(file.path()).expect("open");
        assert_eq!(collect(reader), vec!["alpha", "beta"]);
    }

    #[test]
    fn trailing_partial_line_is_yielded_last() {
        let file = file_with(b"alpha\nbeta");
        let reader = LineReader::open(file.path()).expect("open");
        assert_eq!(collect(reader), vec!["alpha", "beta"]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        let file = file_with(b"\n\nthird\n\n");
        let reader = LineReader::open(file.path()).expect("open");
        assert_eq!(collect(reader), vec!["", "", "third", ""]);
    }

    #[test]
    fn lines_spanning_chunk_boundaries_are_joined() {
        let file = file_with(b"abcdefghij\nklm\nnopqrstuvwxyz");
        let reader = LineReader::with_chunk_size(file.path(), 3).expect("open");
        assert_eq!(collect(reader), vec!["abcdefghij", "klm", "nopqrstuvwxyz"]);
    }

    #[test]
    fn long_line_is_scanned_once() {
        let mut contents = vec![b'x'; 64];
        contents.push(b'\n');
        let file = file_with(&contents);
        let mut reader = LineReader::with_chunk_size(file.path(), 8).expect("open");

        assert!(reader.take_line().is_none());
        assert!(reader.fill().expect("fill"));
        assert!(reader.take_line().is_none());
        assert!(reader.fill().expect("fill"));
        assert!(reader.take_line().is_none());
        assert_eq!(reader.scanned, 16);

        assert_eq!(reader.next().map(|line| line.expect("line").len()), Some(64));
        assert_eq!(reader.scanned, 0);
        assert!(reader.next().is_none());
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let file = file_with(b"a\nb\n");
        let reader = LineReader::with_chunk_size(file.path(), 0).expect("open");
        assert_eq!(reader.chunk_size(), 1);
        assert_eq!(collect(reader), vec!["a", "b"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let file = file_with(b"ok\n\xff\xfe\n");
        let reader = LineReader::open(file.path()).expect("open");
        let lines = collect(reader);
        assert_eq!(lines[0], "ok");
        assert!(lines[1].contains('\u{fffd}'));
    }

    #[test]
    fn exhausted_reader_stays_exhausted() {
        let file = file_with(b"only\n");
        let mut reader = LineReader::open(file.path()).expect("open");
        assert_eq!(reader.next().map(|line| line.expect("line")), Some("only".into()));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[cfg(not(windows))]
    #[test]
    fn carriage_returns_are_kept_on_unix() {
        let file = file_with(b"dos\r\nline\r\n");
        let reader = LineReader::open(file.path()).expect("open");
        assert_eq!(collect(reader), vec!["dos\r", "line\r"]);
    }

    #[cfg(windows)]
    #[test]
    fn carriage_returns_are_stripped_on_windows() {
        let file = file_with(b"dos\r\nline\r\n");
        let reader = LineReader::open(file.path()).expect("open");
        assert_eq!(collect(reader), vec!["dos", "line"]);
    }
}
