//! crates/loggy/src/level.rs
//! Entry levels with their file stems and console signs.

use std::fmt;
use std::str::FromStr;

use colored::{ColoredString, Colorize};

/// Level attached to every entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Level {
    /// Informational entry (`log`, `info`).
    Info,
    /// Completed work (`success`, `Wait::done`).
    Success,
    /// Warning entry.
    Warning,
    /// Error entry, including rendered failures.
    Error,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];

    /// File stem used for persisted entries of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Uncolored level sign.
    #[must_use]
    pub const fn sign(self) -> &'static str {
        match self {
            Self::Info => "[i]",
            Self::Success => "[✓]",
            Self::Warning => "[!]",
            Self::Error => "[x]",
        }
    }

    /// Level sign in its terminal color.
    #[must_use]
    pub fn colored_sign(self) -> ColoredString {
        let (r, g, b) = match self {
            Self::Info => (95, 215, 0),
            Self::Success => (0, 215, 95),
            Self::Warning => (255, 135, 0),
            Self::Error => (255, 0, 0),
        };
        self.sign().truecolor(r, g, b)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown level '{0}'")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" | "log" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(ParseLevelError(other.to_owned())),
        }
    }
}
