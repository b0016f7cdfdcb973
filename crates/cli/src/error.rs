use std::io;
use std::path::PathBuf;

use loggy::LoggyError;
use thiserror::Error;

/// Exit code for usage and configuration errors.
pub const EXIT_USAGE: i32 = 1;

/// Exit code for I/O failures while reading input or writing entries.
pub const EXIT_IO: i32 = 2;

/// Failures surfaced by [`run`](crate::run).
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to read config file '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read stack from '{path}': {source}")]
    ReadStack {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Log(#[from] LoggyError),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::ReadConfig { .. } | Self::ParseConfig { .. } => EXIT_USAGE,
            Self::ReadStack { .. } | Self::Log(_) | Self::Output(_) => EXIT_IO,
        }
    }
}
