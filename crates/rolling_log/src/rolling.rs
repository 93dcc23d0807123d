//! Rotation policy: when does the active target have to be replaced?
//!
//! The policy is evaluated inline with every write. There is no timer, so a
//! logger that stops receiving writes never rotates.

use crate::error::ConfigError;

/// One kibibyte.
pub const KB: i64 = 1024;
/// One mebibyte.
pub const MB: i64 = KB * 1024;
/// Smallest recommended interval for size rolling.
pub const MIN_SIZE_INTERVAL: i64 = 10 * KB;
/// One second.
pub const SECOND: i64 = 1;
/// One minute.
pub const MINUTE: i64 = 60 * SECOND;
/// Smallest recommended interval for time rolling.
pub const MIN_TIME_INTERVAL: i64 = 10 * SECOND;

/// Flag selecting [`Rolling::Time`].
pub const TIME_FLAG: &str = "time";
/// Flag selecting [`Rolling::Size`].
pub const SIZE_FLAG: &str = "size";

/// Rolling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rolling {
    /// Never rotate.
    #[default]
    None,
    /// Rotate once `interval` seconds have passed since the last rotation.
    Time,
    /// Rotate once more than `interval` bytes were written to the target.
    Size,
}

impl Rolling {
    /// Maps a flag to a mode. Anything other than `time` or `size` disables
    /// rolling.
    #[must_use]
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            TIME_FLAG => Self::Time,
            SIZE_FLAG => Self::Size,
            _ => Self::None,
        }
    }

    /// Returns the flag name of the mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Time => TIME_FLAG,
            Self::Size => SIZE_FLAG,
        }
    }

    /// Whether this mode ever rotates.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The recommended minimum interval, if the mode has one.
    #[must_use]
    pub fn min_interval(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Time => Some(MIN_TIME_INTERVAL),
            Self::Size => Some(MIN_SIZE_INTERVAL),
        }
    }
}

/// Rolling mode together with its interval and accumulated state.
///
/// `state` holds the Unix timestamp of the last rotation in time mode and
/// the number of bytes written since the last rotation in size mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollPolicy {
    mode: Rolling,
    interval: i64,
    state: i64,
}

impl RollPolicy {
    /// Creates a policy, rejecting a non-positive interval for an active
    /// mode.
    pub fn new(mode: Rolling, interval: i64) -> Result<Self, ConfigError> {
        if mode.is_active() && interval <= 0 {
            return Err(ConfigError::InvalidInterval(interval));
        }
        Ok(Self {
            mode,
            interval,
            state: 0,
        })
    }

    /// The rolling mode.
    #[must_use]
    pub fn mode(&self) -> Rolling {
        self.mode
    }

    /// Seconds (time mode) or bytes (size mode) between rotations.
    #[must_use]
    pub fn interval(&self) -> i64 {
        self.interval
    }

    /// Last rotation timestamp or byte counter, depending on the mode.
    #[must_use]
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Warning text when the interval is below the recommended minimum.
    #[must_use]
    pub fn undersized_warning(&self) -> Option<&'static str> {
        let min = self.mode.min_interval()?;
        if self.interval >= min {
            return None;
        }
        match self.mode {
            Rolling::Time => Some("time rolling interval too small"),
            Rolling::Size => Some("size rolling interval too small"),
            Rolling::None => None,
        }
    }

    /// Resets the state after a target was opened at `now`.
    pub fn reset(&mut self, now: i64) {
        self.state = match self.mode {
            Rolling::Time => now,
            Rolling::Size | Rolling::None => 0,
        };
    }

    /// Whether the next write must go to a fresh target.
    ///
    /// Size mode compares the bytes written *before* the pending line, so
    /// the line that finds the counter over the limit opens the new file.
    #[must_use]
    pub fn should_rotate(&self, now: i64) -> bool {
        match self.mode {
            Rolling::None => false,
            Rolling::Time => now >= self.state.saturating_add(self.interval),
            Rolling::Size => self.state > self.interval,
        }
    }

    /// Accounts for `len` bytes written to the current target.
    pub fn record(&mut self, len: usize) {
        if self.mode == Rolling::Size {
            let len = i64::try_from(len).unwrap_or(i64::MAX);
            self.state = self.state.saturating_add(len);
        }
    }
}
