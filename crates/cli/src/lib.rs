#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of the `loggy` binary. It logs
//! a single message at a chosen level, or reads a raw stack and logs it as a
//! failure with annotated source excerpts.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error. A [`clap`](https://docs.rs/clap/) command definition
//! parses global logger switches and one subcommand. The logger configuration
//! starts from an optional TOML file (`--config`) and command-line switches
//! are overlaid on top. Console output is captured and copied to the supplied
//! standard output handle once the command finishes.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - `render` never re-raises: the failure is logged and the exit code is `0`.
//! - `--verbose` forces console output even when the config file disables it.
//!
//! # Errors
//!
//! Usage and configuration errors exit with [`EXIT_USAGE`]. Reading the stack,
//! writing log files, or writing output exits with [`EXIT_IO`]. Diagnostics go
//! to the standard error handle.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["loggy", "info", "%1%ready"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert_eq!(stdout, b"    ready\n");
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::{Read, Write};

use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod args;
mod command;
mod config;
mod error;
mod execute;

pub use error::{EXIT_IO, EXIT_USAGE};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Standard input is read only by `render -`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_with_input(arguments, &mut execute::stdin_reader(), stdout, stderr)
}

/// Same as [`run`] with an explicit standard input.
pub fn run_with_input<I, S, In, Out, Err>(
    arguments: I,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: Read,
    Out: Write,
    Err: Write,
{
    let parsed = match args::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_parse_error(&error, stdout, stderr),
    };

    match execute::execute(parsed, stdin, stdout) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "loggy: {error}");
            error.exit_code()
        }
    }
}

fn report_parse_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let rendered = error.render().to_string();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if stdout.write_all(rendered.as_bytes()).is_err() {
                return EXIT_IO;
            }
            0
        }
        _ => {
            let _ = stderr.write_all(rendered.as_bytes());
            EXIT_USAGE
        }
    }
}

/// Installs a `tracing` subscriber writing to standard error.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
