//! Severity vocabulary shared by payloads and decision queries.
//!
//! # Design Decisions
//! - Levels are a closed, totally ordered enum; the ordinal is the enum
//!   discriminant, so `severity >= threshold` is a plain comparison
//! - Parsing is case-insensitive and returns a typed error; an
//!   unrecognized name never silently maps to "always enabled"

use std::fmt;
use std::str::FromStr;

/// A log severity threshold.
///
/// Ordered from most to least verbose: `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    /// Fallback used when a configured default level is unrecognized.
    pub const DEFAULT: Level = Level::Info;

    /// Numeric projection for sinks that take a graded verbosity value.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Case-insensitive parse with surrounding whitespace ignored.
    pub fn parse(name: &str) -> Result<Level, LevelParseError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            _ => Err(LevelParseError {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warn => "Warn",
            Level::Error => "Error",
        };
        f.write_str(name)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s)
    }
}

/// A level name that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized log level {name:?}")]
pub struct LevelParseError {
    /// The rejected name, as supplied.
    pub name: String,
}

/// Outcome of a level-enabled query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Enabled,
    Disabled,
}

impl Decision {
    pub fn is_enabled(self) -> bool {
        matches!(self, Decision::Enabled)
    }
}
