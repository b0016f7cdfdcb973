use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// One-based row and column of a source location.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LineColumn {
    row: NonZeroUsize,
    column: NonZeroUsize,
}

impl LineColumn {
    /// Creates a location from non-zero parts.
    #[must_use]
    pub const fn new(row: NonZeroUsize, column: NonZeroUsize) -> Self {
        Self { row, column }
    }

    /// Creates a location from raw numbers, returning `None` when either is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use excerpt::LineColumn;
    ///
    /// let location = LineColumn::from_parts(10, 5).unwrap();
    /// assert_eq!((location.row(), location.column()), (10, 5));
    /// assert!(LineColumn::from_parts(0, 5).is_none());
    /// ```
    #[must_use]
    pub fn from_parts(row: usize, column: usize) -> Option<Self> {
        Some(Self::new(NonZeroUsize::new(row)?, NonZeroUsize::new(column)?))
    }

    /// Returns the one-based row.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row.get()
    }

    /// Returns the one-based column.
    #[must_use]
    pub const fn column(self) -> usize {
        self.column.get()
    }

    /// Returns the zero-based index of the row.
    #[must_use]
    pub const fn row_index(self) -> usize {
        self.row.get() - 1
    }
}

/// A single parsed entry of a call stack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StackFrame {
    call_site: String,
    source_file: PathBuf,
    line: LineColumn,
}

impl StackFrame {
    /// Creates a frame from its parts.
    #[must_use]
    pub fn new(call_site: impl Into<String>, source_file: impl Into<PathBuf>, line: LineColumn) -> Self {
        Self {
            call_site: call_site.into(),
            source_file: source_file.into(),
            line,
        }
    }

    /// Returns the name of the function or method that owns the frame.
    #[must_use]
    pub fn call_site(&self) -> &str {
        &self.call_site
    }

    /// Returns the source file the frame points into.
    #[must_use]
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Returns the row and column of the frame.
    #[must_use]
    pub const fn line(&self) -> LineColumn {
        self.line
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}:{})",
            self.call_site,
            self.source_file.display(),
            self.line.row(),
            self.line.column()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_index_is_zero_based() {
        let location = LineColumn::from_parts(1, 1).expect("non-zero");
        assert_eq!(location.row_index(), 0);
    }

    #[test]
    fn zero_column_is_rejected() {
        assert!(LineColumn::from_parts(3, 0).is_none());
    }

    #[test]
    fn display_matches_stack_shape() {
        let frame = StackFrame::new(
            "Config.load",
            "/srv/app/config.js",
            LineColumn::from_parts(12, 7).expect("non-zero"),
        );
        assert_eq!(frame.to_string(), "Config.load (/srv/app/config.js:12:7)");
    }
}
