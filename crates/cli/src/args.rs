use std::ffi::OsString;
use std::path::PathBuf;

use clap::ArgMatches;
use loggy::Level;

use crate::command::{PROGRAM_NAME, clap_command};

/// What the invocation asked for.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Action {
    /// Log `message` at `level`.
    Message { level: Level, message: String },
    /// Log a raw stack read from `source` as a failure.
    Render {
        source: OsString,
        skip_files: Vec<PathBuf>,
        skip_calls: Vec<String>,
        slice: usize,
    },
}

/// Logger switches given on the command line.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct Switches {
    pub(crate) config: Option<PathBuf>,
    pub(crate) write: bool,
    pub(crate) signs: bool,
    pub(crate) dtime: bool,
    pub(crate) no_reads: bool,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) indent: Option<usize>,
    pub(crate) verbose: bool,
}

/// Parsed command produced by [`parse_args`].
#[derive(Debug)]
pub(crate) struct ParsedArgs {
    pub(crate) switches: Switches,
    pub(crate) action: Action,
    pub(crate) arguments: Vec<OsString>,
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args.clone())?;
    let Some((name, mut sub)) = matches.remove_subcommand() else {
        return Err(clap_command().error(
            clap::error::ErrorKind::MissingSubcommand,
            "a command is required",
        ));
    };

    let switches = switches(&mut sub, &mut matches);
    let action = match name.as_str() {
        "render" => Action::Render {
            source: sub
                .remove_one::<OsString>("stack")
                .unwrap_or_else(|| OsString::from("-")),
            skip_files: sub
                .remove_many::<OsString>("skip-file")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default(),
            skip_calls: sub
                .remove_many::<String>("skip-call")
                .map(Iterator::collect)
                .unwrap_or_default(),
            slice: sub.remove_one::<usize>("slice").unwrap_or(0),
        },
        other => Action::Message {
            level: other.parse().unwrap_or(Level::Info),
            message: sub.remove_one::<String>("message").unwrap_or_default(),
        },
    };

    Ok(ParsedArgs {
        switches,
        action,
        arguments: args,
    })
}

/// Global switches may appear before or after the subcommand; clap
/// propagates them into the subcommand matches.
fn switches(sub: &mut ArgMatches, root: &mut ArgMatches) -> Switches {
    let flag = |name: &str| sub.get_flag(name);
    let write = flag("write");
    let signs = flag("signs");
    let dtime = flag("dtime");
    let no_reads = flag("no-reads");
    let verbose = flag("verbose");

    let config = sub
        .remove_one::<OsString>("config")
        .or_else(|| root.remove_one::<OsString>("config"))
        .map(PathBuf::from);
    let cwd = sub
        .remove_one::<OsString>("cwd")
        .or_else(|| root.remove_one::<OsString>("cwd"))
        .map(PathBuf::from);
    let indent = sub
        .remove_one::<usize>("indent")
        .or_else(|| root.remove_one::<usize>("indent"));

    Switches {
        config,
        write,
        signs,
        dtime,
        no_reads,
        cwd,
        indent,
        verbose,
    }
}
