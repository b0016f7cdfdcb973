//! crates/cli/src/config.rs
//! Loads the TOML configuration file and overlays command-line switches.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use loggy::LoggyConfig;

use crate::args::Switches;
use crate::error::CliError;

/// Reads `path` as a TOML document. Missing keys keep their defaults.
pub(crate) fn load_file(path: &Path) -> Result<LoggyConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the logger configuration from the optional file and the switches.
///
/// Switches only ever enable behaviour or replace values; they never reset
/// what the file set.
pub(crate) fn resolve(switches: &Switches, arguments: &[OsString]) -> Result<LoggyConfig, CliError> {
    let base = match &switches.config {
        Some(path) => load_file(path)?,
        None => LoggyConfig::default(),
    };

    let mut builder = base.into_builder();
    if switches.write {
        builder = builder.write(true);
    }
    if switches.signs {
        builder = builder.signs(true);
    }
    if switches.dtime {
        builder = builder.dtime(true);
    }
    if switches.no_reads {
        builder = builder.reads(false);
    }
    if let Some(cwd) = &switches.cwd {
        builder = builder.cwd(cwd);
    }
    if let Some(indent) = switches.indent {
        builder = builder.indent(indent);
    }
    if switches.verbose {
        builder = builder.print(true);
    }
    Ok(builder.build_with_args(arguments))
}
