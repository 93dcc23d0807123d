//! The shared logger handle.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};

use crate::error::{ConfigError, Result};
use crate::format::{
    CallSite, Color, Concat, format_line, format_notice, with_rendered, with_scratch,
};
use crate::level::Level;
use crate::rolling::{RollPolicy, Rolling};
use crate::target::{LogFilePath, Target, open_log_file};

/// Global default logger.
static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// Returns the process-wide default logger: info level, console output, no
/// rolling. The crate macros write through it.
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

/// Source of the current wall-clock time.
///
/// Used for line timestamps and for time-based rolling.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Callback invoked when writing a line fails.
///
/// Without a handler the error and the lost line are reported on the console
/// stream.
pub type ErrorHandler = Arc<dyn Fn(io::Error) + Send + Sync>;

/// Logger options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Minimum log level.
    pub level: Level,
    /// Whether lines are wrapped in ANSI color sequences.
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: Level::Info,
            color: true,
        }
    }
}

/// Internal logger state.
struct LoggerInner {
    level: Level,
    color: bool,
    file: Option<LogFilePath>,
    policy: RollPolicy,
    target: Target,
    /// Whether `target` was opened for the current configuration.
    initialized: bool,
    console: Box<dyn Write + Send>,
    clock: Clock,
    error_handler: Option<ErrorHandler>,
}

impl LoggerInner {
    fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    /// Prints an internal notice on the console stream.
    fn notice(&mut self, tag: &str, color: Color, msg: &str) {
        let now = self.now();
        let color = self.color.then_some(color);
        let console = &mut self.console;
        with_scratch(|buf| {
            format_notice(buf, tag, color, &now, msg);
            let _ = console.write_all(buf.as_bytes());
            let _ = console.flush();
        });
    }

    /// Opens a fresh target for the current configuration and resets the
    /// rolling state. The previous target is dropped.
    fn initialize(&mut self, now: i64) -> Result<()> {
        let rolling = self.policy.mode().is_active();
        let path = self.file.as_ref().map(|f| f.resolve(rolling));
        self.target = match path {
            Some(path) => {
                let opened = open_log_file(&path)?;
                if opened.appended {
                    self.notice("Warn", Color::Yellow, "log file exist, append it");
                }
                tracing::debug!(
                    path = %opened.path.display(),
                    appended = opened.appended,
                    "opened log file"
                );
                opened.into()
            }
            None => Target::Console,
        };
        self.policy.reset(now);
        self.initialized = true;
        Ok(())
    }

    /// Runs one line through initialization, the rotation check and the
    /// byte counter, then writes it.
    fn write(&mut self, line: &str, now: i64) -> io::Result<()> {
        if !self.initialized {
            if let Err(err) = self.initialize(now) {
                fatal(err);
            }
        }
        if self.policy.should_rotate(now) {
            let previous = self.target.path().map(Path::to_path_buf);
            if let Err(err) = self.initialize(now) {
                fatal(err);
            }
            tracing::debug!(
                mode = self.policy.mode().as_str(),
                from = ?previous,
                to = ?self.target.path(),
                "rotated log file"
            );
        }
        self.policy.record(line.len());
        self.target.write_line(self.console.as_mut(), line.as_bytes())
    }

    fn reconfigure(&mut self) {
        self.initialized = false;
    }
}

/// Reports a configuration error the caller chose not to handle and aborts
/// the process.
#[cold]
#[track_caller]
fn fatal(err: ConfigError) -> ! {
    let site = CallSite::caller();
    tracing::error!(error = %err, %site, "fatal logger misconfiguration");
    eprintln!("rolling_log: {err} ({site})");
    process::abort()
}

/// A leveled logger with optional file output and rolling.
///
/// `Logger` is a handle: clones share the same configuration and output.
/// A single lock serializes configuration changes with writes, so one write
/// observes one consistent configuration and rotation happens at most once
/// per crossing of the threshold.
///
/// ```rust,no_run
/// use rolling_log::Logger;
///
/// let logger = Logger::new();
/// logger
///     .set_level("debug")
///     .set_log_file("./tmp/app.log")
///     .set_rolling("size", 10 * 1024);
/// logger.info(&[&"started worker ", &3]);
/// logger.debugf(format_args!("queue depth {}\n", 17));
/// ```
pub struct Logger {
    inner: Arc<Mutex<LoggerInner>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Logger")
            .field("level", &inner.level)
            .field("color", &inner.color)
            .field("file", &inner.file)
            .field("policy", &inner.policy)
            .field("target", &inner.target.path())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Creates a new logger with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a new logger with the given options.
    #[must_use]
    pub fn with_options(opts: Options) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LoggerInner {
                level: opts.level,
                color: opts.color,
                file: None,
                policy: RollPolicy::default(),
                target: Target::Console,
                initialized: false,
                console: Box::new(io::stdout()),
                clock: Arc::new(Local::now),
                error_handler: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoggerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the console stream (standard output by default).
    ///
    /// Lines go there while no log file is configured, and so do the
    /// logger's own notices.
    #[must_use]
    pub fn with_console<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.lock().console = Box::new(writer);
        self
    }

    /// Replaces the clock used for timestamps and time-based rolling.
    #[must_use]
    pub fn with_clock<F>(self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.lock().clock = Arc::new(clock);
        self
    }

    /// Sets a handler for I/O failures while writing lines.
    ///
    /// ```rust
    /// use rolling_log::Logger;
    ///
    /// let logger = Logger::new().with_error_handler(|err| {
    ///     eprintln!("log write failed: {err}");
    /// });
    /// ```
    #[must_use]
    pub fn with_error_handler<F>(self, handler: F) -> Self
    where
        F: Fn(io::Error) + Send + Sync + 'static,
    {
        self.lock().error_handler = Some(Arc::new(handler));
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Sets the minimum level from its flag name.
    ///
    /// Aborts the process if `flag` is not exactly `debug`, `info`, `warn`
    /// or `error`.
    #[track_caller]
    pub fn set_level(&self, flag: &str) -> &Self {
        match self.try_set_level(flag) {
            Ok(this) => this,
            Err(err) => fatal(err),
        }
    }

    /// Sets the minimum level from its flag name.
    pub fn try_set_level(&self, flag: &str) -> Result<&Self> {
        let level = flag.parse::<Level>()?;
        self.lock().level = level;
        Ok(self)
    }

    /// Returns the current minimum level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.lock().level
    }

    /// Sets whether lines are wrapped in ANSI colors.
    pub fn set_color(&self, color: bool) -> &Self {
        self.lock().color = color;
        self
    }

    /// Directs output to the file at `path`.
    ///
    /// The file is opened on the next write.
    ///
    /// Aborts the process if the path has no file name or the file name
    /// contains a path separator.
    #[track_caller]
    pub fn set_log_file(&self, path: &str) -> &Self {
        match self.try_set_log_file(path) {
            Ok(this) => this,
            Err(err) => fatal(err),
        }
    }

    /// Directs output to the file at `path`.
    pub fn try_set_log_file(&self, path: &str) -> Result<&Self> {
        let file = LogFilePath::parse(path)?;
        let mut inner = self.lock();
        inner.file = Some(file);
        inner.reconfigure();
        Ok(self)
    }

    /// The configured log file path, before any rolling suffix.
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.lock().file.as_ref().map(LogFilePath::path)
    }

    /// Path of the file currently written to, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().target.path().map(Path::to_path_buf)
    }

    /// Enables rolling: `flag` is `time` (interval in seconds) or `size`
    /// (interval in bytes). Any other flag disables rolling.
    ///
    /// Aborts the process if no log file is configured, or if rolling is
    /// requested with a non-positive interval.
    #[track_caller]
    pub fn set_rolling(&self, flag: &str, interval: i64) -> &Self {
        match self.try_set_rolling(flag, interval) {
            Ok(this) => this,
            Err(err) => fatal(err),
        }
    }

    /// Enables rolling from its flag name. See [`Logger::set_rolling`].
    pub fn try_set_rolling(&self, flag: &str, interval: i64) -> Result<&Self> {
        self.try_set_rolling_mode(Rolling::from_flag(flag), interval)
    }

    /// Enables rolling in `mode`.
    ///
    /// An interval below [`MIN_TIME_INTERVAL`](crate::MIN_TIME_INTERVAL) or
    /// [`MIN_SIZE_INTERVAL`](crate::MIN_SIZE_INTERVAL) is accepted with a
    /// warning on the console stream.
    pub fn try_set_rolling_mode(&self, mode: Rolling, interval: i64) -> Result<&Self> {
        let mut inner = self.lock();
        if inner.file.is_none() {
            return Err(ConfigError::LogFileNotSet);
        }
        let policy = RollPolicy::new(mode, interval)?;
        if let Some(warning) = policy.undersized_warning() {
            inner.notice("Warn", Color::Yellow, warning);
        }
        inner.policy = policy;
        inner.reconfigure();
        Ok(self)
    }

    /// The rolling mode.
    #[must_use]
    pub fn rolling(&self) -> Rolling {
        self.lock().policy.mode()
    }

    /// The rolling interval, in seconds or bytes depending on the mode.
    #[must_use]
    pub fn interval(&self) -> i64 {
        self.lock().policy.interval()
    }

    /// Opens the output target now instead of on the first write.
    ///
    /// Returns the directory or file error a lazy open would abort on.
    pub fn open(&self) -> Result<()> {
        let mut inner = self.lock();
        let now = inner.now().timestamp();
        inner.initialize(now)
    }

    // =========================================================================
    // Emitting
    // =========================================================================

    /// Logs `msg` at `level` on behalf of `site`.
    ///
    /// With `line_feed` a `\n` follows the line. Messages below the current
    /// level are dropped.
    ///
    /// `msg` is rendered before the lock is taken, so its `Display` impl may
    /// log through this same logger.
    pub fn log(&self, level: Level, site: CallSite, msg: impl fmt::Display, line_feed: bool) {
        if level < self.level() {
            return;
        }
        with_rendered(msg, |text| {
            let inner = self.lock();
            if level >= inner.level {
                Self::emit(inner, level, site, text, line_feed);
            }
        });
    }

    /// Formats and writes one line while holding the lock, then reports a
    /// failed write.
    fn emit(
        mut inner: MutexGuard<'_, LoggerInner>,
        level: Level,
        site: CallSite,
        msg: &str,
        line_feed: bool,
    ) {
        let now = inner.now();
        let result = with_scratch(|buf| {
            format_line(buf, level, &now, site, msg, line_feed, inner.color);
            inner
                .write(buf, now.timestamp())
                .map_err(|err| (err, buf.trim_end_matches('\n').to_string()))
        });

        let Err((err, line)) = result else {
            return;
        };
        tracing::warn!(error = %err, "log write failed");
        if let Some(handler) = inner.error_handler.clone() {
            drop(inner);
            handler(err);
        } else {
            inner.notice("Error", Color::Red, &format!("log output error {err}"));
            inner.notice("OutPut", Color::Blue, &line);
        }
    }

    /// Logs the concatenation of `args` at debug level, plus a newline.
    #[track_caller]
    pub fn debug(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::Debug, CallSite::caller(), Concat(args), true);
    }

    /// Logs a formatted message at debug level. No newline is added.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, CallSite::caller(), args, false);
    }

    /// Logs the concatenation of `args` at info level, plus a newline.
    #[track_caller]
    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::Info, CallSite::caller(), Concat(args), true);
    }

    /// Logs a formatted message at info level. No newline is added.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, CallSite::caller(), args, false);
    }

    /// Logs the concatenation of `args` at warn level, plus a newline.
    #[track_caller]
    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::Warn, CallSite::caller(), Concat(args), true);
    }

    /// Logs a formatted message at warn level. No newline is added.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, CallSite::caller(), args, false);
    }

    /// Logs the concatenation of `args` at error level, plus a newline.
    #[track_caller]
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::Error, CallSite::caller(), Concat(args), true);
    }

    /// Logs a formatted message at error level. No newline is added.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, CallSite::caller(), args, false);
    }

    /// Logs at error level regardless of the threshold, then exits the
    /// process with status 1.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn fmt::Display]) -> ! {
        let site = CallSite::caller();
        with_rendered(Concat(args), |text| {
            Self::emit(self.lock(), Level::Error, site, text, true);
        });
        process::exit(1)
    }

    /// Formatted variant of [`Logger::fatal`]. No newline is added.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let site = CallSite::caller();
        with_rendered(args, |text| {
            Self::emit(self.lock(), Level::Error, site, text, false);
        });
        process::exit(1)
    }
}
