//! Line formatting: level tag, timestamp, call site and ANSI color.
//!
//! Every emitted line has the shape
//!
//! ```text
//! ESC[<code>;3m[<L>|<YYYY-MM-DD>|<HH:MM:SS>] <file>:<line> <message>ESC[0m
//! ```
//!
//! where `<L>` is the level character and `<file>` the base name of the
//! source file that issued the call.

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::panic::Location;

use chrono::{DateTime, Local};

use crate::level::Level;

/// Date part of the timestamp.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time part of the timestamp.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Escape sequence that resets all attributes.
const RESET: &str = "\x1b[0m";

thread_local! {
    static SCRATCH: RefCell<String> = RefCell::new(String::with_capacity(256));
    static MESSAGE: RefCell<String> = RefCell::new(String::with_capacity(128));
}

/// Source location of a logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file path as reported by the compiler.
    pub file: &'static str,
    /// Line number.
    pub line: u32,
}

impl CallSite {
    /// Placeholder for calls whose origin is unknown.
    pub const UNKNOWN: Self = Self {
        file: "???",
        line: 0,
    };

    /// Captures the location of the caller.
    ///
    /// Inside a `#[track_caller]` chain this resolves to the outermost
    /// non-tracked call, i.e. user code.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }

    /// Returns the last component of the file path.
    #[must_use]
    pub fn base_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.base_name(), self.line)
    }
}

/// Terminal colors used for the level wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Errors.
    Red,
    /// Info.
    Green,
    /// Warnings.
    Yellow,
    /// Debug. Rendered with the cyan code.
    Blue,
}

impl Color {
    /// SGR foreground code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 36,
        }
    }

    /// The color a level is rendered with.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Debug => Self::Blue,
            Level::Info => Self::Green,
            Level::Warn => Self::Yellow,
            Level::Error => Self::Red,
        }
    }

    /// Wraps `s` in this color.
    #[must_use]
    pub fn paint(self, s: &str) -> String {
        format!("\x1b[{};3m{s}{RESET}", self.code())
    }
}

/// Displays a list of values back to back, with no separator.
pub struct Concat<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arg in self.0 {
            arg.fmt(f)?;
        }
        Ok(())
    }
}

/// Renders one log line into `buf`, replacing its previous contents.
pub(crate) fn format_line(
    buf: &mut String,
    level: Level,
    now: &DateTime<Local>,
    site: CallSite,
    msg: impl fmt::Display,
    line_feed: bool,
    color: bool,
) {
    buf.clear();
    let paint = color.then(|| Color::for_level(level));
    if let Some(c) = paint {
        let _ = write!(buf, "\x1b[{};3m", c.code());
    }
    let _ = write!(
        buf,
        "[{}|{}|{}] {site} {msg}",
        level.as_char(),
        now.format(DATE_FORMAT),
        now.format(TIME_FORMAT),
    );
    if paint.is_some() {
        buf.push_str(RESET);
    }
    if line_feed {
        buf.push('\n');
    }
}

/// Renders an internal notice such as `[Warn|2024-01-02|03:04:05] msg`.
///
/// Notices carry a free-form tag instead of a level character and no call
/// site. They always end with a newline.
pub(crate) fn format_notice(
    buf: &mut String,
    tag: &str,
    color: Option<Color>,
    now: &DateTime<Local>,
    msg: &str,
) {
    buf.clear();
    if let Some(c) = color {
        let _ = write!(buf, "\x1b[{};3m", c.code());
    }
    let _ = write!(
        buf,
        "[{tag}|{}|{}] {msg}",
        now.format(DATE_FORMAT),
        now.format(TIME_FORMAT),
    );
    if color.is_some() {
        buf.push_str(RESET);
    }
    buf.push('\n');
}

/// Renders `msg` into this thread's message buffer and runs `f` on the text.
///
/// A `Display` impl that logs while being rendered gets a fresh buffer for
/// its own message.
pub(crate) fn with_rendered<R>(msg: impl fmt::Display, f: impl FnOnce(&str) -> R) -> R {
    MESSAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            buf.clear();
            let _ = write!(buf, "{msg}");
            f(&buf)
        }
        Err(_) => f(&msg.to_string()),
    })
}

/// Runs `f` with this thread's scratch buffer.
///
/// The buffer is emptied before `f` sees it. A nested call falls back to a
/// fresh buffer.
pub(crate) fn with_scratch<R>(f: impl FnOnce(&mut String) -> R) -> R {
    SCRATCH.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            buf.clear();
            f(&mut buf)
        }
        Err(_) => f(&mut String::new()),
    })
}
