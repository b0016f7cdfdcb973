#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/loggy/src/lib.rs
//!
//! # Overview
//!
//! `loggy` is a leveled logger for command-line programs. Entries go to the
//! console, to per-level daily files, or both. Failures are rendered with the
//! source lines surrounding every frame of their stack, so the offending code
//! is visible right under the error message.
//!
//! # Design
//!
//! - [`LoggyConfig`] is immutable and assembled with [`LoggyConfig::builder`].
//! - [`Loggy`] formats entries (indent marker, sign, timestamp) and hands them
//!   to a shared [`Console`] and to [`logging_sink::DailyLogDir`].
//! - [`Failure`] records the caller location and, when enabled, a standard
//!   library backtrace. Its stack is parsed and rendered by the [`excerpt`]
//!   crate.
//! - [`Wait`] drives a spinner thread that shares only the console.
//!
//! # Invariants
//!
//! - A message starting with `%N%` is indented by `N * indent` spaces and the
//!   marker never reaches the output.
//! - Persisted entries are free of ANSI escapes and end in `\r\n`.
//! - A failure logged with `throw` enabled is always handed back as
//!   [`LoggyError::Raised`], even when writing the entry failed.
//!
//! # Errors
//!
//! Operations return [`LoggyError`]. Frames whose source cannot be read are
//! dropped from the rendering and never produce an error.
//!
//! # Examples
//!
//! ```
//! use loggy::{Console, Failure, Loggy, LoggyConfig, LoggyError, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let config = LoggyConfig::builder().build_with_args(["app"]);
//! let loggy = Loggy::with_console(config, Console::new(buffer.clone()));
//!
//! loggy.warn("disk almost full")?;
//! let raised = loggy.error(Failure::new("disk full"));
//!
//! assert!(matches!(raised, Err(LoggyError::Raised(_))));
//! assert!(buffer.contents().starts_with("disk almost full\ndisk full"));
//! # Ok::<(), LoggyError>(())
//! ```

mod config;
mod console;
mod error;
mod failure;
mod indent;
mod level;
mod logger;
mod report;
mod timestamp;
mod wait;

pub use config::{DEFAULT_INDENT, DEFAULT_LOG_DIR, LoggyConfig, LoggyConfigBuilder, VERBOSE_FLAG};
pub use console::{Console, SharedBuffer};
pub use error::LoggyError;
pub use excerpt::{RenderedFrame, RenderedStack};
pub use failure::{CALLER_FRAME, Failure};
pub use indent::{MAX_INDENT_LEVELS, MAX_INDENT_WIDTH, indentation, split_indent};
pub use level::{Level, ParseLevelError};
pub use logger::{ASSERTION_FAILED, INTERNAL_CALLS, Loggy};
pub use report::{AssertCallback, Assertion, ErrorOptions, Report};
pub use wait::{FRAME_INTERVAL, SPINNER_FRAMES, Wait};
