#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output side of `loggy`: a [`MessageSink`] that
//! streams already-formatted text into any [`std::io::Write`] implementor, and
//! a [`DailyLogDir`] that appends color-stripped entries to one file per level
//! and per day.
//!
//! # Design
//!
//! [`MessageSink`] is a thin wrapper that owns its writer and a [`LineMode`]
//! describing how each entry is terminated. The console path uses
//! [`LineMode::WithNewline`]; persisted files use [`LineMode::WithCrlf`]; the
//! spinner redraws its frame in place with [`LineMode::WithoutNewline`].
//! [`DailyLogDir`] opens its target file in append mode for every entry, so
//! no handle outlives a logging call.
//!
//! # Invariants
//!
//! - Persisted entries never contain ANSI SGR sequences; [`strip_ansi`] runs
//!   before every append.
//! - File names follow `{level}-{year}-{month}-{day}.log` with unpadded month
//!   and day.
//! - The log directory and file are created lazily on first append.
//!
//! # Errors
//!
//! [`MessageSink`] surfaces [`std::io::Error`] values from its writer.
//! [`DailyLogDir::append`] wraps failures in [`PersistError`] together with
//! the path that could not be written.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LineMode, MessageSink};
//!
//! let mut output = Vec::new();
//! let mut sink = MessageSink::new(&mut output);
//! sink.write("[i] ready")?;
//! sink.write_with_mode("working", LineMode::WithoutNewline)?;
//! drop(sink);
//!
//! assert_eq!(output, b"[i] ready\nworking");
//! # Ok::<(), std::io::Error>(())
//! ```

mod ansi;
mod daily;
mod line_mode;
mod sink;

pub use ansi::strip_ansi;
pub use daily::{DailyLogDir, PersistError, log_file_name};
pub use line_mode::LineMode;
pub use sink::MessageSink;
