//! crates/loggy/src/logger.rs
//! The [`Loggy`] facade: formatting, console output, persistence, and failures.

use std::collections::HashSet;
use std::panic::Location;
use std::env;
use std::path::{Component, Path, PathBuf};

use colored::Colorize;
use excerpt::{CallSkipList, RenderedStack, Renderer, StackFrame};
use logging_sink::DailyLogDir;
use time::OffsetDateTime;
use tracing::{trace, warn};

use crate::config::LoggyConfig;
use crate::console::Console;
use crate::error::LoggyError;
use crate::failure::Failure;
use crate::indent::{indentation, split_indent};
use crate::level::Level;
use crate::report::{Assertion, ErrorOptions, Report};
use crate::timestamp;
use crate::wait::Wait;

/// Call-site prefixes hidden from every rendered stack.
///
/// These cover the standard library and the frames this crate adds while
/// capturing and logging a failure.
pub const INTERNAL_CALLS: [&str; 5] = ["std", "core", "alloc", "excerpt", "loggy"];

/// Message used for failures raised by a callback assertion.
pub const ASSERTION_FAILED: &str = "assertion failed";

/// Leveled logger writing to a console and, optionally, daily log files.
///
/// # Examples
///
/// ```
/// use loggy::{Console, Loggy, LoggyConfig, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let config = LoggyConfig::builder().build_with_args(["app"]);
/// let loggy = Loggy::with_console(config, Console::new(buffer.clone()));
///
/// loggy.info("%1%starting")?;
/// assert_eq!(buffer.contents(), "    starting\n");
/// # Ok::<(), loggy::LoggyError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Loggy {
    config: LoggyConfig,
    console: Console,
    files: DailyLogDir,
}

impl Default for Loggy {
    fn default() -> Self {
        Self::new(LoggyConfig::builder().build())
    }
}

impl Loggy {
    /// Logger printing to standard output.
    #[must_use]
    pub fn new(config: LoggyConfig) -> Self {
        Self::with_console(config, Console::stdout())
    }

    /// Logger printing to `console`.
    #[must_use]
    pub fn with_console(config: LoggyConfig, console: Console) -> Self {
        let files = DailyLogDir::new(config.cwd());
        Self {
            config,
            console,
            files,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LoggyConfig {
        &self.config
    }

    /// Console this logger prints to.
    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Path of the file `level` entries are appended to today.
    #[must_use]
    pub fn log_file(&self, level: Level) -> PathBuf {
        self.files.path_for(level.as_str(), timestamp::now().date())
    }

    /// Logs an informational entry. Same as [`Loggy::info`].
    pub fn log(&self, message: impl AsRef<str>) -> Result<(), LoggyError> {
        self.info(message)
    }

    /// Logs an informational entry.
    pub fn info(&self, message: impl AsRef<str>) -> Result<(), LoggyError> {
        self.emit(Level::Info, message.as_ref())
    }

    /// Logs a success entry.
    pub fn success(&self, message: impl AsRef<str>) -> Result<(), LoggyError> {
        self.emit(Level::Success, message.as_ref())
    }

    /// Logs a warning entry.
    pub fn warn(&self, message: impl AsRef<str>) -> Result<(), LoggyError> {
        self.emit(Level::Warning, message.as_ref())
    }

    /// Logs an error message or a failure with default options.
    ///
    /// A failure is returned as [`LoggyError::Raised`] after logging when
    /// `throw` is enabled.
    pub fn error(&self, report: impl Into<Report>) -> Result<(), LoggyError> {
        self.error_with(report, &ErrorOptions::default())
    }

    /// Logs an error message or a failure with per-call options.
    pub fn error_with(
        &self,
        report: impl Into<Report>,
        options: &ErrorOptions,
    ) -> Result<(), LoggyError> {
        match report.into() {
            Report::Message(message) => self.emit(Level::Error, &message),
            Report::Failure(failure) => self.log_failure(failure, options),
        }
    }

    /// Checks `condition`, acting on `action` only when it is false.
    ///
    /// A message is logged through the failure path at the caller's location,
    /// so the `throw` setting applies. A callback receives the rendered stack
    /// and the failure instead, and nothing is printed or written.
    #[track_caller]
    pub fn assert(&self, condition: bool, action: impl Into<Assertion>) -> Result<(), LoggyError> {
        if condition {
            return Ok(());
        }
        let location = Location::caller();
        match action.into() {
            Assertion::Message(message) => self.error(Failure::capture(message, location)),
            Assertion::Callback(callback) => {
                let failure = Failure::capture(ASSERTION_FAILED, location);
                let rendered = self.render_stack(&failure, &ErrorOptions::default());
                callback(rendered, failure);
                Ok(())
            }
        }
    }

    /// Starts a spinner for `message` and returns its handle.
    ///
    /// The spinner only runs when `print` is enabled.
    pub fn wait(&self, message: impl Into<String>) -> Wait {
        Wait::start(self.clone(), message.into())
    }

    /// Renders the stack of `failure` with the internal and per-call skip lists.
    ///
    /// Frames repeating an earlier location are dropped.
    #[must_use]
    pub fn render_stack(&self, failure: &Failure, options: &ErrorOptions) -> RenderedStack {
        let frames = options.skip_files().apply(failure.raw_stack().into_frames());
        let frames = dedup_locations(frames);

        let mut skip_calls: CallSkipList = INTERNAL_CALLS.into_iter().collect();
        skip_calls.extend(options.skip_calls().names().iter().cloned());

        Renderer::new().with_skip_calls(skip_calls).render(&frames)
    }

    fn log_failure(&self, failure: Failure, options: &ErrorOptions) -> Result<(), LoggyError> {
        let failure = failure.sliced(options.slice_count());
        let now = timestamp::now();
        let mut text = self.decorate(Level::Error, failure.message(), now);
        if self.config.reads() {
            let rendered = self.render_stack(&failure, options);
            if !rendered.is_empty() {
                text.push('\n');
                text.push_str(&rendered.to_string());
            }
        }

        let written = self.output(Level::Error, &text, now);
        if !self.config.throw() {
            return written;
        }
        if let Err(error) = written {
            warn!(%error, "log output failed while re-raising a failure");
        }
        Err(LoggyError::Raised(failure))
    }

    fn emit(&self, level: Level, message: &str) -> Result<(), LoggyError> {
        let now = timestamp::now();
        let text = self.decorate(level, message, now);
        self.output(level, &text, now)
    }

    /// Applies the indent marker, timestamp, and sign to `message`.
    pub(crate) fn decorate(&self, level: Level, message: &str, now: OffsetDateTime) -> String {
        let (levels, body) = split_indent(message);
        let mut text = indentation(levels, self.config.indent());
        if self.config.signs() {
            text.push_str(&level.colored_sign().to_string());
            text.push(' ');
        }
        if self.config.dtime() {
            text.push_str(&timestamp::format(now).bright_black().to_string());
            text.push(' ');
        }
        text.push_str(body);
        text
    }

    fn output(&self, level: Level, text: &str, now: OffsetDateTime) -> Result<(), LoggyError> {
        if self.config.print() {
            self.console.write_line(text).map_err(LoggyError::Console)?;
        }
        if self.config.write() {
            let path = self.files.append(level.as_str(), now.date(), text)?;
            trace!(path = %path.display(), %level, "persisted entry");
        }
        Ok(())
    }
}

fn dedup_locations(mut frames: Vec<StackFrame>) -> Vec<StackFrame> {
    let base = env::current_dir().ok();
    let mut seen = HashSet::new();
    frames.retain(|frame| {
        let key = location_key(frame.source_file(), base.as_deref());
        seen.insert((key, frame.line().row()))
    });
    frames
}

/// `src/a.rs`, `./src/a.rs` and `{base}/src/a.rs` share one key.
fn location_key(path: &Path, base: Option<&Path>) -> PathBuf {
    let joined = match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    };
    joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::SharedBuffer;
    use logging_sink::strip_ansi;

    fn logger(builder: crate::config::LoggyConfigBuilder) -> (Loggy, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let config = builder.build_with_args(["test"]);
        (Loggy::with_console(config, Console::new(buffer.clone())), buffer)
    }

    #[test]
    fn plain_entries_are_printed_verbatim() {
        let (loggy, buffer) = logger(LoggyConfig::builder());
        loggy.log("a").unwrap();
        loggy.success("b").unwrap();
        loggy.warn("c").unwrap();
        loggy.error("d").unwrap();
        assert_eq!(buffer.contents(), "a\nb\nc\nd\n");
    }

    #[test]
    fn print_disabled_is_silent() {
        let (loggy, buffer) = logger(LoggyConfig::builder().print(false));
        loggy.info("hidden").unwrap();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn indent_comes_before_sign() {
        let (loggy, _) = logger(LoggyConfig::builder().signs(true).indent(2));
        let text = loggy.decorate(Level::Warning, "%2%careful", timestamp::now());
        assert_eq!(strip_ansi(&text), "    [!] careful");
    }

    #[test]
    fn timestamp_follows_sign() {
        let (loggy, _) = logger(LoggyConfig::builder().signs(true).dtime(true));
        let now = time::macros::datetime!(2024-02-03 04:05:06 UTC);
        let text = loggy.decorate(Level::Info, "hello", now);
        assert_eq!(strip_ansi(&text), "[i] 2024-02-03 04:05:06 hello");
    }

    #[test]
    fn failure_is_raised_when_throw_enabled() {
        let (loggy, buffer) = logger(LoggyConfig::builder());
        let err = loggy.error(Failure::with_stack("broken", "")).unwrap_err();
        assert_eq!(err.into_failure().unwrap().message(), "broken");
        assert_eq!(buffer.contents(), "broken\n");
    }

    #[test]
    fn failure_is_swallowed_when_throw_disabled() {
        let (loggy, buffer) = logger(LoggyConfig::builder().throw(false));
        loggy.error(Failure::with_stack("broken", "")).unwrap();
        assert_eq!(buffer.contents(), "broken\n");
    }

    #[test]
    fn assert_true_logs_nothing() {
        let (loggy, buffer) = logger(LoggyConfig::builder());
        loggy.assert(true, "never shown").unwrap();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn assert_records_caller_line() {
        let (loggy, _) = logger(LoggyConfig::builder().print(false));
        let line = line!() + 1;
        let err = loggy.assert(false, "bad").unwrap_err();
        let failure = err.into_failure().unwrap();
        assert_eq!(failure.location().line(), line);
        assert!(failure.location().file().ends_with("logger.rs"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let line = excerpt::LineColumn::from_parts(3, 1).unwrap();
        let other = excerpt::LineColumn::from_parts(3, 9).unwrap();
        let frames = vec![
            StackFrame::new("<caller>", "/src/a.rs", line),
            StackFrame::new("app::run", "/src/a.rs", other),
            StackFrame::new("app::main", "/src/b.rs", line),
        ];
        let kept = dedup_locations(frames);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].call_site(), "<caller>");
        assert_eq!(kept[1].source_file(), Path::new("/src/b.rs"));
    }

    #[test]
    fn dedup_ignores_current_dir_prefix() {
        let line = excerpt::LineColumn::from_parts(3, 13).unwrap();
        let frames = vec![
            StackFrame::new("<caller>", "src/app.rs", line),
            StackFrame::new("app::main", "./src/app.rs", line),
        ];
        let kept = dedup_locations(frames);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].call_site(), "<caller>");
    }

    #[test]
    fn caller_and_backtrace_frame_render_once() {
        let (loggy, _) = logger(LoggyConfig::builder());
        let raw = "<caller> (src/logger.rs:3:1)\n   0: app::main\n             at ./src/logger.rs:3:1";
        let rendered = loggy.render_stack(&Failure::with_stack("x", raw), &ErrorOptions::default());
        assert_eq!(rendered.len(), 1);
    }

    #[test]
    fn relative_and_absolute_keys_match() {
        let base = Path::new("/work");
        assert_eq!(
            location_key(Path::new("./src/app.rs"), Some(base)),
            location_key(Path::new("/work/src/app.rs"), Some(base))
        );
        assert_eq!(
            location_key(Path::new("./src/app.rs"), None),
            PathBuf::from("src/app.rs")
        );
    }

    #[test]
    fn internal_calls_are_hidden() {
        let skip: CallSkipList = INTERNAL_CALLS.into_iter().collect();
        assert!(skip.matches("loggy::failure::Failure::capture"));
        assert!(skip.matches("std::backtrace::Backtrace::capture"));
        assert!(!skip.matches("<caller>"));
        assert!(!skip.matches("loggy_bin::main"));
    }
}
