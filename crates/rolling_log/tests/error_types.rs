//! Unit tests for rolling_log error types.
//!
//! Tests verify:
//! - Error creation from the configuration API
//! - Display formatting
//! - Error chaining (source)
//! - FromStr integration

use rolling_log::{ConfigError, Level, LogFilePath, Logger, ParseLevelError, ParseResult};
use std::error::Error as StdError;
use std::str::FromStr;

mod parse_level_tests {
    use super::*;

    #[test]
    fn test_various_invalid_inputs() {
        let invalid_inputs = [
            "", "foobar", "123", "VERBOSE", "INFO", "Debug", "warning", "fatal", "trace",
        ];

        for input in invalid_inputs {
            let result = Level::from_str(input);
            assert!(result.is_err(), "Expected error for input: {}", input);
        }
    }

    #[test]
    fn test_display_contains_invalid_value() {
        let e = Level::from_str("badlevel").unwrap_err();
        let msg = format!("{}", e);
        assert!(msg.contains("invalid level"));
        assert!(msg.contains("badlevel"));
    }

    #[test]
    fn test_debug_impl() {
        let e = Level::from_str("xyz").unwrap_err();
        assert!(format!("{:?}", e).contains("ParseLevelError"));
    }

    #[test]
    fn test_no_source() {
        let e = Level::from_str("invalid").unwrap_err();
        assert!(e.source().is_none());
    }

    #[test]
    fn test_result_alias() {
        fn parse(s: &str) -> ParseResult<Level> {
            s.parse()
        }
        assert_eq!(parse("warn").unwrap(), Level::Warn);
        let err: ParseLevelError = parse("nope").unwrap_err();
        assert_eq!(err.input(), "nope");
    }
}

mod config_error_tests {
    use super::*;

    #[test]
    fn test_try_set_level_returns_invalid_level() {
        let err = Logger::new().try_set_level("loud").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(_)));
        assert!(err.to_string().contains("\"loud\""));
        assert!(err.to_string().contains("debug,info,warn,error"));
    }

    #[test]
    fn test_try_set_log_file_rejects_empty_name() {
        let err = Logger::new().try_set_log_file("").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFileName(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_try_set_log_file_rejects_separator_in_name() {
        let err = Logger::new().try_set_log_file("logs/a\\b.log").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFileName(_)));
        assert!(err.to_string().contains("path separator"));
    }

    #[test]
    fn test_try_set_rolling_without_file() {
        let err = Logger::new().try_set_rolling("size", 1024).unwrap_err();
        assert!(matches!(err, ConfigError::LogFileNotSet));
        assert_eq!(err.to_string(), "please set log file first");
    }

    #[test]
    fn test_try_set_rolling_negative_interval() {
        let logger = Logger::new();
        logger.try_set_log_file("/tmp/unused.log").unwrap();
        let err = logger.try_set_rolling("time", -1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval(-1)));
    }

    #[test]
    fn test_failed_configuration_leaves_logger_unchanged() {
        let logger = Logger::new();
        assert!(logger.try_set_level("nope").is_err());
        assert_eq!(logger.level(), Level::Info);
        assert!(logger.try_set_log_file("").is_err());
        assert!(logger.log_file().is_none());
    }

    #[test]
    fn test_io_error_has_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let target = blocker.join("nested/app.log");
        let logger = Logger::new();
        logger.try_set_log_file(target.to_str().unwrap()).unwrap();

        let err = logger.open().unwrap_err();
        assert!(matches!(err, ConfigError::CreateDir { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_log_file_path_errors_match_logger_errors() {
        assert!(matches!(
            LogFilePath::parse("dir/.hidden"),
            Err(ConfigError::EmptyFileName(_))
        ));
    }
}
