use std::ffi::OsStr;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use excerpt::parse_raw_stack;
use loggy::{Console, ErrorOptions, Failure, Level, Loggy, SharedBuffer};
use tracing::debug;

use crate::args::{Action, ParsedArgs};
use crate::command::STDIN_OPERAND;
use crate::config;
use crate::error::CliError;

/// Message used when a raw stack carries no message line.
const FALLBACK_MESSAGE: &str = "error";

pub(crate) fn execute<In, Out>(parsed: ParsedArgs, stdin: &mut In, stdout: &mut Out) -> Result<(), CliError>
where
    In: Read,
    Out: Write,
{
    let ParsedArgs {
        switches,
        action,
        arguments,
    } = parsed;

    let mut config = config::resolve(&switches, &arguments)?;
    if matches!(action, Action::Render { .. }) {
        config = config.into_builder().throw(false).build_with_args(&arguments);
    }
    debug!(?config, "resolved logger configuration");

    let buffer = SharedBuffer::new();
    let loggy = Loggy::with_console(config, Console::new(buffer.clone()));
    let outcome = run_action(&loggy, action, stdin);

    stdout
        .write_all(buffer.contents().as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::Output)?;
    outcome
}

fn run_action<In: Read>(loggy: &Loggy, action: Action, stdin: &mut In) -> Result<(), CliError> {
    match action {
        Action::Message { level, message } => {
            match level {
                Level::Info => loggy.info(&message)?,
                Level::Success => loggy.success(&message)?,
                Level::Warning => loggy.warn(&message)?,
                Level::Error => loggy.error(message)?,
            }
            Ok(())
        }
        Action::Render {
            source,
            skip_files,
            skip_calls,
            slice,
        } => {
            let raw = read_stack(&source, stdin)?;
            let options = skip_files
                .into_iter()
                .fold(ErrorOptions::new().slice(slice), ErrorOptions::skip_file);
            let options = skip_calls.into_iter().fold(options, ErrorOptions::skip_call);
            let message = stack_message(&raw);
            loggy.error_with(Failure::with_stack(message, raw), &options)?;
            Ok(())
        }
    }
}

fn read_stack<In: Read>(source: &OsStr, stdin: &mut In) -> Result<String, CliError> {
    if source == STDIN_OPERAND {
        let mut bytes = Vec::new();
        stdin
            .read_to_end(&mut bytes)
            .map_err(|source| CliError::ReadStack {
                path: PathBuf::from(STDIN_OPERAND),
                source,
            })?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    let path = PathBuf::from(source);
    let bytes = fs::read(&path).map_err(|source| CliError::ReadStack { path, source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// First non-blank line of the stack that is not itself a frame.
fn stack_message(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && parse_raw_stack(line).is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
        .to_owned()
}

pub(crate) fn stdin_reader() -> io::StdinLock<'static> {
    io::stdin().lock()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_first_non_frame_line() {
        let raw = "\nTypeError: x is undefined\n    at run (/a.js:1:1)";
        assert_eq!(stack_message(raw), "TypeError: x is undefined");
    }

    #[test]
    fn stack_without_message_falls_back() {
        assert_eq!(stack_message("    at run (/a.js:1:1)\n"), FALLBACK_MESSAGE);
        assert_eq!(stack_message(""), FALLBACK_MESSAGE);
    }

    #[test]
    fn dash_reads_from_stdin() {
        let mut input: &[u8] = b"Error: piped\n";
        let raw = read_stack(OsStr::new("-"), &mut input).unwrap();
        assert_eq!(raw, "Error: piped\n");
    }

    #[test]
    fn missing_stack_file_is_io_error() {
        let mut input: &[u8] = b"";
        let err = read_stack(OsStr::new("/nonexistent/stack.txt"), &mut input).unwrap_err();
        assert!(matches!(err, CliError::ReadStack { .. }));
    }
}
