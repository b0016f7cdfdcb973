use std::path::{Path, PathBuf};

use super::frame::StackFrame;

/// Source files whose frames are dropped while parsing a stack.
///
/// An entry matches a frame whose file equals it or ends with it
/// component-wise, so `src/logger.rs` matches `/work/app/src/logger.rs`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileSkipList {
    paths: Vec<PathBuf>,
}

impl FileSkipList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Adds a path to the list.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Reports whether the list holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Reports whether `path` is excluded.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.paths
            .iter()
            .any(|skipped| path == skipped || path.ends_with(skipped))
    }

    /// Removes the frames whose source file is excluded.
    #[must_use]
    pub fn apply(&self, mut frames: Vec<StackFrame>) -> Vec<StackFrame> {
        if !self.is_empty() {
            frames.retain(|frame| !self.matches(frame.source_file()));
        }
        frames
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileSkipList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<PathBuf>> Extend<P> for FileSkipList {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}

/// Call-site names whose frames are hidden from rendered output.
///
/// An entry matches a call site equal to it, or one that continues it with a
/// `::` or `.` path separator: `loggy::Loggy::assert` hides
/// `loggy::Loggy::assert::{{closure}}` but not `loggy::Loggy::assert_eq`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallSkipList {
    names: Vec<String>,
}

impl CallSkipList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Adds a call-site name to the list.
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Reports whether the list holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Reports whether `call_site` is hidden.
    #[must_use]
    pub fn matches(&self, call_site: &str) -> bool {
        self.names.iter().any(|name| {
            call_site.strip_prefix(name.as_str()).is_some_and(|rest| {
                rest.is_empty() || rest.starts_with("::") || rest.starts_with('.')
            })
        })
    }
}

impl<S: Into<String>> FromIterator<S> for CallSkipList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for CallSkipList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
