use std::io;
use std::path::{Path, PathBuf};

use logging_sink::PersistError;
use thiserror::Error;

use crate::failure::Failure;

/// Errors returned by [`Loggy`](crate::Loggy) operations.
#[derive(Debug, Error)]
pub enum LoggyError {
    /// A persisted log file could not be created or appended to.
    #[error("failed to write log file '{path}': {source}")]
    Io {
        /// File or directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The console writer failed.
    #[error("failed to write to the console: {0}")]
    Console(#[source] io::Error),
    /// A failure was logged and is handed back to the caller.
    #[error("{0}")]
    Raised(Failure),
}

impl LoggyError {
    /// Path involved in a persistence failure.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Console(_) | Self::Raised(_) => None,
        }
    }

    /// Returns the re-raised failure, if this is one.
    #[must_use]
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Self::Raised(failure) => Some(failure),
            Self::Io { .. } | Self::Console(_) => None,
        }
    }
}

impl From<PersistError> for LoggyError {
    fn from(error: PersistError) -> Self {
        let (path, source) = error.into_parts();
        Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_displays_failure_message() {
        let error = LoggyError::Raised(Failure::with_stack("bad input", ""));
        assert_eq!(error.to_string(), "bad input");
        assert!(error.path().is_none());
        assert_eq!(error.into_failure().unwrap().message(), "bad input");
    }

    #[test]
    fn io_reports_path() {
        let error = LoggyError::Io {
            path: PathBuf::from("/logs/info-2024-1-1.log"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(error.path(), Some(Path::new("/logs/info-2024-1-1.log")));
        assert!(error.to_string().contains("/logs/info-2024-1-1.log"));
        assert!(error.into_failure().is_none());
    }
}
