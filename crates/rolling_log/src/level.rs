//! Log levels and their textual flags.

use std::fmt;
use thiserror::Error;

/// Flag selecting [`Level::Debug`].
pub const DEBUG_FLAG: &str = "debug";
/// Flag selecting [`Level::Info`].
pub const INFO_FLAG: &str = "info";
/// Flag selecting [`Level::Warn`].
pub const WARN_FLAG: &str = "warn";
/// Flag selecting [`Level::Error`].
pub const ERROR_FLAG: &str = "error";

/// Log level for filtering messages.
///
/// Levels are ordered by severity; a logger suppresses every message whose
/// level is lower than its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Level {
    /// Debug level (most verbose).
    Debug,
    /// Info level (default).
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level (least verbose).
    Error,
}

impl Level {
    /// All levels, most verbose first.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the flag name of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => DEBUG_FLAG,
            Self::Info => INFO_FLAG,
            Self::Warn => WARN_FLAG,
            Self::Error => ERROR_FLAG,
        }
    }

    /// Returns the single-character tag written at the start of each line.
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DEBUG_FLAG => Ok(Self::Debug),
            INFO_FLAG => Ok(Self::Info),
            WARN_FLAG => Ok(Self::Warn),
            ERROR_FLAG => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid log level string.
///
/// Accepted names are exactly `debug`, `info`, `warn` and `error`.
///
/// ```rust
/// use rolling_log::Level;
/// use std::str::FromStr;
///
/// assert!(Level::from_str("warn").is_ok());
/// assert!(Level::from_str("warning").is_err());
/// assert!(Level::from_str("WARN").is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid level: {0:?}")]
pub struct ParseLevelError(pub(crate) String);

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

/// A specialized [`Result`] type for level parsing operations.
pub type ParseResult<T> = std::result::Result<T, ParseLevelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert!("warning".parse::<Level>().is_err());
        assert!("fatal".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_parse_is_case_sensitive() {
        for input in ["INFO", "Debug", "wArN", "ERROR"] {
            let err = input.parse::<Level>().unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_level_char() {
        let chars: String = Level::ALL.iter().map(Level::as_char).collect();
        assert_eq!(chars, "DIWE");
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert_eq!(err.input(), "loud");
    }
}
