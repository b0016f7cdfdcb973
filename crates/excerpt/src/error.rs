//! Error type for opening source files.

use std::io;
use std::path::{Path, PathBuf};

/// Error returned when a [`LineReader`](crate::LineReader) cannot be opened.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The path does not exist at the time the reader was opened.
    #[error("no such file or directory '{}'", .path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The path exists but could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub(crate) fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return Self::not_found(path);
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}
