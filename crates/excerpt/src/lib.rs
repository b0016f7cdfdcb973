#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/excerpt/src/lib.rs
//!
//! # Overview
//!
//! `excerpt` turns the textual call stack of a failure into annotated source
//! excerpts. It is the annotation engine behind `loggy`'s error path and is
//! split into three layers, leaves first:
//!
//! - [`LineReader`] streams the lines of a source file in fixed-size chunks
//!   without loading the whole file.
//! - [`RawStack`] and [`parse_raw_stack`] recover [`StackFrame`] values from a
//!   raw stack text, honouring a [`FileSkipList`].
//! - [`Renderer`] opens each frame's source, cuts the excerpt window around the
//!   failing row, and assembles a [`RenderedStack`] with a shared gutter width.
//!
//! # Design
//!
//! Every value produced here is owned by the call that created it. The
//! renderer keeps no cache between calls and reads sources strictly in stack
//! order on the calling thread. Stack text formats vary between runtimes, so
//! the parser is the only module that knows about textual shapes: both the
//! `name (file:row:col)` shape and the native `std::backtrace::Backtrace`
//! layout are recognised.
//!
//! # Invariants
//!
//! - Excerpt windows never start before line 1 and never contain lines past
//!   the end of the file.
//! - The gutter width of a [`RenderedStack`] is identical for every frame in
//!   it.
//! - Missing sources and malformed stack entries drop the affected frame and
//!   never surface as errors.
//!
//! # Errors
//!
//! Only [`LineReader`] construction is fallible and reports a [`ReadError`].
//! Rendering recovers from every per-frame failure locally.
//!
//! # Examples
//!
//! ```
//! use excerpt::parse_raw_stack;
//!
//! let frames = parse_raw_stack(
//!     "Error: boom\n    at load (/srv/app/config.js:12:7)\n    at main (/srv/app/index.js:3:1)",
//! );
//!
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].call_site(), "load");
//! assert_eq!(frames[0].line().row(), 12);
//! assert_eq!(frames[1].line().column(), 1);
//! ```

mod error;
mod line_reader;
mod render;
mod stack;

pub use error::ReadError;
pub use line_reader::{DEFAULT_CHUNK_SIZE, LineReader};
pub use render::{
    ExcerptLine, GUTTER_PADDING, LEADING_CONTEXT, RenderedFrame, RenderedStack, Renderer,
    TRAILING_CONTEXT, gutter_width,
};
pub use stack::{CallSkipList, FileSkipList, LineColumn, RawStack, StackFrame, parse_raw_stack};
