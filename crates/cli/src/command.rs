//! crates/cli/src/command.rs
//! `clap` command definition for the `loggy` binary.

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};

/// Program name used when the argument list is empty.
pub(crate) const PROGRAM_NAME: &str = "loggy";

/// Operand value that makes `render` read the stack from standard input.
pub(crate) const STDIN_OPERAND: &str = "-";

fn message_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        Arg::new("message")
            .value_name("MESSAGE")
            .help("Text to log. A leading %N% indents it by N levels.")
            .required(true)
            .allow_hyphen_values(true),
    )
}

fn render_command() -> Command {
    Command::new("render")
        .about("Log a raw stack as a failure with source excerpts.")
        .arg(
            Arg::new("skip-file")
                .long("skip-file")
                .value_name("PATH")
                .help("Hide frames located in PATH.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("skip-call")
                .long("skip-call")
                .value_name("NAME")
                .help("Hide frames whose call site is NAME or lives under it.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("slice")
                .long("slice")
                .value_name("COUNT")
                .help("Drop COUNT leading frames before rendering.")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("stack")
                .value_name("STACK")
                .help("File holding the raw stack, or '-' for standard input.")
                .value_parser(OsStringValueParser::new())
                .required(true),
        )
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Leveled console and file logger with annotated failure excerpts.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Load logger options from a TOML file.")
                .value_parser(OsStringValueParser::new())
                .global(true),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .help("Append entries to per-level daily log files.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("signs")
                .long("signs")
                .help("Prefix entries with a colored level sign.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("dtime")
                .long("dtime")
                .help("Prefix entries with the local date and time.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-reads")
                .long("no-reads")
                .help("Do not include source excerpts for failures.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("cwd")
                .long("cwd")
                .value_name("DIR")
                .help("Directory receiving the log files.")
                .value_parser(OsStringValueParser::new())
                .global(true),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_name("SPACES")
                .help("Spaces per %N% indent level.")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Always print entries to the console.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(message_command("info", "Log an informational message.").visible_alias("log"))
        .subcommand(message_command("success", "Log a success message."))
        .subcommand(message_command("warn", "Log a warning message."))
        .subcommand(message_command("error", "Log an error message."))
        .subcommand(render_command())
}
