//! crates/logging-sink/src/daily.rs

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::Date;

use crate::ansi::strip_ansi;
use crate::line_mode::LineMode;
use crate::sink::MessageSink;

/// Error returned when a persisted entry cannot be written.
#[derive(Debug, Error)]
#[error("failed to write log entry to '{path}': {source}")]
pub struct PersistError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl PersistError {
    fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }

    /// Path that could not be created or appended to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the error, returning the path and the underlying I/O error.
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, io::Error) {
        (self.path, self.source)
    }
}

/// Returns the file name used for `stem` entries written on `date`.
///
/// Month and day are not zero padded.
///
/// # Examples
///
/// ```
/// use logging_sink::log_file_name;
/// use time::macros::date;
///
/// assert_eq!(log_file_name("error", date!(2024 - 03 - 07)), "error-2024-3-7.log");
/// ```
#[must_use]
pub fn log_file_name(stem: &str, date: Date) -> String {
    format!(
        "{stem}-{}-{}-{}.log",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Directory receiving one append-only file per level and per day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DailyLogDir {
    root: PathBuf,
}

impl DailyLogDir {
    /// Creates a handle for `root`. Nothing is touched on disk until the first append.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the files live in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the `stem` file for `date`.
    #[must_use]
    pub fn path_for(&self, stem: &str, date: Date) -> PathBuf {
        self.root.join(log_file_name(stem, date))
    }

    /// Appends `entry` with ANSI escapes removed and a `\r\n` terminator.
    ///
    /// Creates the directory and the file when they do not exist yet and
    /// returns the path written to.
    pub fn append(&self, stem: &str, date: Date, entry: &str) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.root).map_err(|err| PersistError::new(self.root.clone(), err))?;

        let path = self.path_for(stem, date);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| PersistError::new(path.clone(), err))?;

        let mut sink = MessageSink::with_line_mode(file, LineMode::WithCrlf);
        sink.write(strip_ansi(entry))
            .and_then(|()| sink.flush())
            .map_err(|err| PersistError::new(path.clone(), err))?;
        Ok(path)
    }
}
