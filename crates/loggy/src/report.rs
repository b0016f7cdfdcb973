//! crates/loggy/src/report.rs
//! Inputs accepted by [`Loggy::error`](crate::Loggy::error) and [`Loggy::assert`](crate::Loggy::assert).

use std::fmt;
use std::path::PathBuf;

use excerpt::{CallSkipList, FileSkipList, RenderedStack};

use crate::failure::Failure;

/// Input accepted by [`Loggy::error`](crate::Loggy::error).
#[derive(Debug)]
pub enum Report {
    /// Plain error message, logged like any other level.
    Message(String),
    /// Failure whose stack is rendered beneath its message.
    Failure(Failure),
}

impl From<&str> for Report {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for Report {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Failure> for Report {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

/// Callback invoked by [`Loggy::assert`](crate::Loggy::assert) instead of logging.
pub type AssertCallback = Box<dyn FnOnce(RenderedStack, Failure)>;

/// Action taken when an assertion does not hold.
pub enum Assertion {
    /// Log the message through the failure path.
    Message(String),
    /// Hand the rendered stack and the failure to a callback.
    Callback(AssertCallback),
}

impl Assertion {
    /// Wraps `callback` as an assertion action.
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(RenderedStack, Failure) + 'static,
    {
        Self::Callback(Box::new(callback))
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<&str> for Assertion {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for Assertion {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// Per-call options for [`Loggy::error_with`](crate::Loggy::error_with).
#[derive(Clone, Debug, Default)]
pub struct ErrorOptions {
    skip_calls: CallSkipList,
    skip_files: FileSkipList,
    slice: usize,
}

impl ErrorOptions {
    /// Options with empty skip lists and no slicing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes frames whose call site is `name` or lives under it.
    #[must_use]
    pub fn skip_call(mut self, name: impl Into<String>) -> Self {
        self.skip_calls.push(name);
        self
    }

    /// Excludes frames located in `path`.
    #[must_use]
    pub fn skip_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_files.push(path);
        self
    }

    /// Drops `count` leading frames from the failure before rendering and re-raising.
    #[must_use]
    pub const fn slice(mut self, count: usize) -> Self {
        self.slice = count;
        self
    }

    /// Call-site skip list.
    #[must_use]
    pub const fn skip_calls(&self) -> &CallSkipList {
        &self.skip_calls
    }

    /// File skip list.
    #[must_use]
    pub const fn skip_files(&self) -> &FileSkipList {
        &self.skip_files
    }

    /// Number of leading frames dropped.
    #[must_use]
    pub const fn slice_count(&self) -> usize {
        self.slice
    }
}
