#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Rolling Log
//!
//! A small leveled logger for processes that want colored lines on the
//! console or in a file, with optional rolling of that file.
//!
//! - Four levels (debug, info, warn, error) plus `fatal`, which exits
//! - Output to standard output or to a file, created lazily on first write
//! - Rolling by elapsed time or by bytes written, with collision-free
//!   `name_N.ext` file names
//! - One shared, lock-protected logger that any number of threads write to
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolling_log::{default_logger, info, infof};
//!
//! default_logger()
//!     .set_level("debug")
//!     .set_log_file("./tmp/test.log")
//!     .set_rolling("time", rolling_log::MINUTE);
//!
//! info!("served ", 3, " requests");
//! infof!("latency {}ms\n", 12);
//! ```
//!
//! ## Line format
//!
//! ```text
//! ESC[32;3m[I|2024-03-09|07:05:01] main.rs:12 served 3 requestsESC[0m
//! ```
//!
//! The variadic calls (`info!`, [`Logger::info`]) end the line with `\n`.
//! The formatted calls (`infof!`, [`Logger::infof`]) write exactly what the
//! format string produces and add no terminator.

mod error;
mod format;
mod level;
mod logger;
mod rolling;
mod target;

pub use error::{ConfigError, Result};
pub use format::{CallSite, Color, Concat, DATE_FORMAT, TIME_FORMAT};
pub use level::{DEBUG_FLAG, ERROR_FLAG, INFO_FLAG, Level, ParseLevelError, ParseResult, WARN_FLAG};
pub use logger::{Clock, ErrorHandler, Logger, Options, default_logger};
pub use rolling::{
    KB, MB, MIN_SIZE_INTERVAL, MIN_TIME_INTERVAL, MINUTE, RollPolicy, Rolling, SECOND, SIZE_FLAG,
    TIME_FLAG,
};
pub use target::LogFilePath;

/// Logs the concatenation of its arguments at debug level on the default
/// logger, followed by a newline.
#[macro_export]
macro_rules! debug {
    ($($arg:expr),* $(,)?) => {
        $crate::default_logger().debug(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Logs a formatted message at debug level on the default logger.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)*) => {
        $crate::default_logger().debugf(::std::format_args!($($arg)*))
    };
}

/// Logs the concatenation of its arguments at info level on the default
/// logger, followed by a newline.
#[macro_export]
macro_rules! info {
    ($($arg:expr),* $(,)?) => {
        $crate::default_logger().info(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Logs a formatted message at info level on the default logger.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)*) => {
        $crate::default_logger().infof(::std::format_args!($($arg)*))
    };
}

/// Logs the concatenation of its arguments at warn level on the default
/// logger, followed by a newline.
#[macro_export]
macro_rules! warn {
    ($($arg:expr),* $(,)?) => {
        $crate::default_logger().warn(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Logs a formatted message at warn level on the default logger.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)*) => {
        $crate::default_logger().warnf(::std::format_args!($($arg)*))
    };
}

/// Logs the concatenation of its arguments at error level on the default
/// logger, followed by a newline.
#[macro_export]
macro_rules! error {
    ($($arg:expr),* $(,)?) => {
        $crate::default_logger().error(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Logs a formatted message at error level on the default logger.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::default_logger().errorf(::std::format_args!($($arg)*))
    };
}

/// Logs at error level on the default logger, then exits with status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:expr),* $(,)?) => {
        $crate::default_logger().fatal(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Formatted variant of [`fatal!`]; exits with status 1.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)*) => {
        $crate::default_logger().fatalf(::std::format_args!($($arg)*))
    };
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        CallSite, ConfigError, Level, LogFilePath, Logger, Options, ParseLevelError, Rolling,
        default_logger,
    };
}
