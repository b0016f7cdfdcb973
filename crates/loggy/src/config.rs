//! crates/loggy/src/config.rs
//! Immutable logger configuration assembled by overlaying fields onto defaults.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Command-line switch that forces console output regardless of `print`.
pub const VERBOSE_FLAG: &str = "--verbose";

/// Spaces per `%N%` indent level when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Directory name appended to the working directory for persisted logs.
pub const DEFAULT_LOG_DIR: &str = "logs";

fn default_log_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_LOG_DIR)
}

/// Options controlling where entries go and how they are decorated.
///
/// Build one with [`LoggyConfig::builder`]. With the `serde` feature enabled
/// a partial document deserializes onto [`LoggyConfig::default`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LoggyConfig {
    print: bool,
    write: bool,
    dtime: bool,
    signs: bool,
    reads: bool,
    throw: bool,
    indent: usize,
    cwd: PathBuf,
}

impl Default for LoggyConfig {
    fn default() -> Self {
        Self {
            print: true,
            write: false,
            dtime: false,
            signs: false,
            reads: true,
            throw: true,
            indent: DEFAULT_INDENT,
            cwd: default_log_dir(),
        }
    }
}

impl LoggyConfig {
    /// Creates a [`LoggyConfigBuilder`] seeded with the defaults.
    #[must_use]
    pub fn builder() -> LoggyConfigBuilder {
        LoggyConfigBuilder::default()
    }

    /// Creates a builder seeded with this configuration.
    #[must_use]
    pub fn into_builder(self) -> LoggyConfigBuilder {
        LoggyConfigBuilder { config: self }
    }

    /// Whether entries are written to the console.
    #[must_use]
    pub const fn print(&self) -> bool {
        self.print
    }

    /// Whether entries are appended to the daily level files.
    #[must_use]
    pub const fn write(&self) -> bool {
        self.write
    }

    /// Whether entries carry a local timestamp.
    #[must_use]
    pub const fn dtime(&self) -> bool {
        self.dtime
    }

    /// Whether entries carry a colored level sign.
    #[must_use]
    pub const fn signs(&self) -> bool {
        self.signs
    }

    /// Whether failures include source excerpts.
    #[must_use]
    pub const fn reads(&self) -> bool {
        self.reads
    }

    /// Whether failures are handed back to the caller after logging.
    #[must_use]
    pub const fn throw(&self) -> bool {
        self.throw
    }

    /// Spaces per indent level.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Directory holding the persisted log files.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

/// Builder used to assemble a [`LoggyConfig`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoggyConfigBuilder {
    config: LoggyConfig,
}

impl LoggyConfigBuilder {
    /// Enables or disables console output.
    #[must_use]
    pub fn print(mut self, enabled: bool) -> Self {
        self.config.print = enabled;
        self
    }

    /// Enables or disables persisted log files.
    #[must_use]
    pub fn write(mut self, enabled: bool) -> Self {
        self.config.write = enabled;
        self
    }

    /// Enables or disables the timestamp prefix.
    #[must_use]
    pub fn dtime(mut self, enabled: bool) -> Self {
        self.config.dtime = enabled;
        self
    }

    /// Enables or disables the level sign prefix.
    #[must_use]
    pub fn signs(mut self, enabled: bool) -> Self {
        self.config.signs = enabled;
        self
    }

    /// Enables or disables source excerpts for failures.
    #[must_use]
    pub fn reads(mut self, enabled: bool) -> Self {
        self.config.reads = enabled;
        self
    }

    /// Enables or disables handing failures back after logging.
    #[must_use]
    pub fn throw(mut self, enabled: bool) -> Self {
        self.config.throw = enabled;
        self
    }

    /// Sets the number of spaces per `%N%` indent level.
    #[must_use]
    pub fn indent(mut self, spaces: usize) -> Self {
        self.config.indent = spaces;
        self
    }

    /// Sets the directory that receives persisted log files.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cwd = dir.into();
        self
    }

    /// Finalises the configuration, honouring `--verbose` in the process arguments.
    #[must_use]
    pub fn build(self) -> LoggyConfig {
        self.build_with_args(env::args_os())
    }

    /// Finalises the configuration, honouring `--verbose` in `args`.
    #[must_use]
    pub fn build_with_args<I, S>(self, args: I) -> LoggyConfig
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut config = self.config;
        let verbose = OsString::from(VERBOSE_FLAG);
        if args.into_iter().any(|arg| arg.as_ref() == verbose) {
            config.print = true;
        }
        config
    }
}
