//! crates/loggy/src/failure.rs
//! Failure values carrying a message, the caller location, and a raw stack.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::panic::Location;

use excerpt::RawStack;

/// Call-site name recorded for the synthetic caller frame.
pub const CALLER_FRAME: &str = "<caller>";

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Error object handed to [`Loggy::error`](crate::Loggy::error).
///
/// The raw stack starts with one frame for the location that created the
/// failure, formatted as `<caller> (file:line:column)`. When the standard
/// library captures a backtrace (`RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`),
/// its frames follow.
///
/// # Examples
///
/// ```
/// use loggy::Failure;
///
/// let failure = Failure::new("config missing");
/// assert_eq!(failure.to_string(), "config missing");
/// assert!(failure.stack().starts_with("<caller> ("));
/// ```
#[derive(Debug)]
pub struct Failure {
    message: String,
    source: Option<BoxedSource>,
    location: &'static Location<'static>,
    stack: String,
}

impl Failure {
    /// Creates a failure at the caller's location.
    #[track_caller]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::capture(message, Location::caller())
    }

    /// Creates a failure recorded at `location`.
    #[must_use]
    pub fn capture(message: impl Into<String>, location: &'static Location<'static>) -> Self {
        let mut stack = caller_frame(location);
        let backtrace = Backtrace::capture();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            stack.push('\n');
            stack.push_str(&backtrace.to_string());
        }
        Self {
            message: message.into(),
            source: None,
            location,
            stack,
        }
    }

    /// Creates a failure around a stack produced elsewhere.
    ///
    /// `raw` may use the `[at ]name (file:row:col)` line format or the
    /// standard library's backtrace layout.
    #[track_caller]
    #[must_use]
    pub fn with_stack(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            location: Location::caller(),
            stack: raw.into(),
        }
    }

    /// Wraps an existing error, keeping it as the [`Error::source`].
    #[track_caller]
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let mut failure = Self::capture(error.to_string(), Location::caller());
        failure.source = Some(Box::new(error));
        failure
    }

    /// Failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location that created the failure.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Raw stack text.
    #[must_use]
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Parses the raw stack.
    #[must_use]
    pub fn raw_stack(&self) -> RawStack {
        RawStack::parse(&self.stack)
    }

    /// Drops the first `count` frames from the raw stack.
    ///
    /// Non-frame lines are kept.
    #[must_use]
    pub fn sliced(mut self, count: usize) -> Self {
        if count > 0 {
            self.stack = self.raw_stack().skip_frames(count).to_string();
        }
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

fn caller_frame(location: &Location<'_>) -> String {
    format!(
        "{CALLER_FRAME} ({}:{}:{})",
        location.file(),
        location.line(),
        location.column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn new_records_caller_location() {
        let line = line!() + 1;
        let failure = Failure::new("boom");
        assert_eq!(failure.location().line(), line);
        assert!(failure.location().file().ends_with("failure.rs"));
    }

    #[test]
    fn caller_frame_parses_back() {
        let failure = Failure::new("boom");
        let frames = failure.raw_stack().into_frames();
        let first = frames.first().unwrap();
        assert_eq!(first.call_site(), CALLER_FRAME);
        assert_eq!(first.line().row(), failure.location().line() as usize);
        assert_eq!(first.line().column(), failure.location().column() as usize);
    }

    #[test]
    fn with_stack_keeps_raw_text() {
        let raw = "Error: nope\n    at run (/src/app.rs:3:1)";
        let failure = Failure::with_stack("nope", raw);
        assert_eq!(failure.stack(), raw);
        assert_eq!(failure.raw_stack().frame_count(), 1);
    }

    #[test]
    fn from_error_keeps_source() {
        let failure = Failure::from_error(io::Error::other("disk gone"));
        assert_eq!(failure.message(), "disk gone");
        let source = failure.source().unwrap();
        assert_eq!(source.to_string(), "disk gone");
    }

    #[test]
    fn sliced_drops_leading_frames() {
        let raw = "Error: nope\n    at a (/src/a.rs:1:1)\n    at b (/src/b.rs:2:2)";
        let failure = Failure::with_stack("nope", raw).sliced(1);
        let frames = failure.raw_stack().into_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].call_site(), "b");
        assert!(failure.stack().starts_with("Error: nope"));
    }

    #[test]
    fn sliced_zero_is_identity() {
        let raw = "    at a (/src/a.rs:1:1)";
        let failure = Failure::with_stack("x", raw).sliced(0);
        assert_eq!(failure.stack(), raw);
    }
}
