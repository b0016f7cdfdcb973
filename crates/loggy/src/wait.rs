//! crates/loggy/src/wait.rs
//! Progress spinner returned by [`Loggy::wait`](crate::Loggy::wait).
//!
//! The spinner runs on its own thread and redraws one console line until
//! [`Wait::done`] or [`Wait::fail`] signals it over a channel. Dropping a
//! [`Wait`] without settling it leaves the spinner running for the rest of the
//! process.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::console::Console;
use crate::error::LoggyError;
use crate::failure::Failure;
use crate::indent::{indentation, split_indent};
use crate::logger::Loggy;

/// Frames cycled by the spinner.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between two spinner frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Handle to a running spinner.
///
/// `done` and `fail` stop the spinner and log exactly once; later calls on a
/// settled handle do nothing.
#[derive(Debug)]
pub struct Wait {
    logger: Loggy,
    message: String,
    spinner: Option<Spinner>,
    settled: bool,
}

#[derive(Debug)]
struct Spinner {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Wait {
    pub(crate) fn start(logger: Loggy, message: String) -> Self {
        let spinner = if logger.config().print() {
            let (levels, body) = split_indent(&message);
            let indent = indentation(levels, logger.config().indent());
            Spinner::spawn(logger.console().clone(), indent, body.to_owned())
        } else {
            None
        };
        Self {
            logger,
            message,
            spinner,
            settled: false,
        }
    }

    /// Message shown next to the spinner.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Reports whether the spinner thread is still being driven by this handle.
    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.spinner.is_some()
    }

    /// Reports whether `done` or `fail` already ran.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.settled
    }

    /// Stops the spinner and logs the message as a success.
    pub fn done(&mut self) -> Result<(), LoggyError> {
        if !self.settle() {
            return Ok(());
        }
        self.logger.success(&self.message)
    }

    /// Stops the spinner and logs the message as an error.
    ///
    /// A supplied failure is then logged through the failure path, and its
    /// re-raise result is returned even when writing the message failed.
    pub fn fail(&mut self, failure: Option<Failure>) -> Result<(), LoggyError> {
        if !self.settle() {
            return Ok(());
        }
        let logged = self.logger.error(self.message.as_str());
        let raised = failure.map_or(Ok(()), |failure| self.logger.error(failure));
        raised.and(logged)
    }

    /// Stops the spinner, returning `false` when already settled.
    fn settle(&mut self) -> bool {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
        !std::mem::replace(&mut self.settled, true)
    }
}

impl Spinner {
    fn spawn(console: Console, indent: String, body: String) -> Option<Self> {
        let (stop, signal) = crossbeam_channel::bounded(1);
        let spawned = thread::Builder::new()
            .name("loggy-wait".to_owned())
            .spawn(move || spin(&console, &indent, &body, &signal));
        match spawned {
            Ok(handle) => Some(Self { stop, handle }),
            Err(error) => {
                warn!(%error, "failed to start spinner thread");
                None
            }
        }
    }

    fn stop(self) {
        // A full or closed channel means the thread is already stopping.
        let _ = self.stop.try_send(());
        if self.handle.join().is_err() {
            warn!("spinner thread panicked");
        }
    }
}

fn spin(console: &Console, indent: &str, body: &str, signal: &Receiver<()>) {
    for frame in SPINNER_FRAMES.iter().cycle() {
        if let Err(error) = console.redraw(&format!("{indent}{frame} {body}")) {
            debug!(%error, "spinner redraw failed");
        }
        match signal.recv_timeout(FRAME_INTERVAL) {
            Ok(()) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => thread::sleep(FRAME_INTERVAL),
        }
    }
    if let Err(error) = console.clear_line() {
        debug!(%error, "spinner clear failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggyConfig;
    use crate::console::SharedBuffer;

    fn logger(print: bool) -> (Loggy, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let config = LoggyConfig::builder()
            .print(print)
            .throw(false)
            .build_with_args(["test"]);
        (Loggy::with_console(config, Console::new(buffer.clone())), buffer)
    }

    #[test]
    fn done_is_idempotent() {
        let (loggy, buffer) = logger(true);
        let mut wait = loggy.wait("syncing");
        assert!(wait.is_spinning());
        wait.done().unwrap();
        wait.done().unwrap();
        assert!(wait.is_settled());
        assert!(!wait.is_spinning());

        let output = buffer.contents();
        assert_eq!(output.matches("syncing\n").count(), 1);
        assert!(output.ends_with("\r\u{1b}[2Ksyncing\n"));
    }

    #[test]
    fn fail_after_done_is_ignored() {
        let (loggy, buffer) = logger(true);
        let mut wait = loggy.wait("task");
        wait.done().unwrap();
        wait.fail(Some(Failure::with_stack("late", ""))).unwrap();
        assert!(!buffer.contents().contains("late"));
    }

    #[test]
    fn fail_logs_message_then_failure() {
        let (loggy, buffer) = logger(true);
        let mut wait = loggy.wait("upload");
        wait.fail(Some(Failure::with_stack("network down", ""))).unwrap();
        let output = buffer.contents();
        let message = output.find("upload\n").unwrap();
        let failure = output.find("network down\n").unwrap();
        assert!(message < failure);
    }

    #[test]
    fn print_disabled_starts_no_thread() {
        let (loggy, buffer) = logger(false);
        let mut wait = loggy.wait("quiet");
        assert!(!wait.is_spinning());
        wait.done().unwrap();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn spinner_label_is_indented() {
        let (loggy, buffer) = logger(true);
        let mut wait = loggy.wait("%1%nested");
        thread::sleep(FRAME_INTERVAL * 2);
        wait.done().unwrap();
        let output = buffer.contents();
        assert!(output.contains("    ⠋ nested"));
        assert!(output.ends_with("    nested\n"));
    }
}
