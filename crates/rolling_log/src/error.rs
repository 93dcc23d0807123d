//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::level::ParseLevelError;

/// A misconfiguration of the logger.
///
/// The aborting configuration methods on [`Logger`](crate::Logger) treat
/// every variant as fatal. The `try_*` methods return it instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The level flag is not one of `debug`, `info`, `warn`, `error`.
    #[error("log flag {:?} not support(debug,info,warn,error)", .0.input())]
    InvalidLevel(#[from] ParseLevelError),

    /// The log file path has no directory component.
    #[error("invalid log file {0:?}: empty directory")]
    EmptyDirectory(String),

    /// The log file path has no file name component.
    #[error("invalid log file {0:?}: empty file name")]
    EmptyFileName(String),

    /// The file name component contains a path separator.
    #[error("invalid path {0:?}: file name contains a path separator")]
    InvalidFileName(String),

    /// Rolling was requested before a log file was configured.
    #[error("please set log file first")]
    LogFileNotSet,

    /// A rolling mode was requested with a non-positive interval.
    #[error("invalid interval value {0}")]
    InvalidInterval(i64),

    /// The directories leading to the log file could not be created.
    #[error("failed to create log directory {path:?}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The log file could not be opened.
    #[error("initialize log file error {path:?}: {source}")]
    OpenFile {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A specialized [`Result`] type for logger configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_level_wraps_parse_error() {
        let err: ConfigError = "loud".parse::<crate::Level>().unwrap_err().into();
        assert!(matches!(err, ConfigError::InvalidLevel(_)));
        assert!(err.to_string().contains("loud"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_variants_expose_source() {
        let err = ConfigError::OpenFile {
            path: PathBuf::from("/nope/app.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("app.log"));
        assert!(err.source().is_some());
    }
}
