//! Wall-clock time windows for the time gate
//!
//! Windows are same-day and inclusive at both ends. A window whose start is
//! after its end would cross midnight; those are rejected rather than
//! wrapped. Use two windows (`22:00-23:59` and `00:00-02:00`) instead.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// A wall-clock time with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimeOfDay` if the hour or minute is out of range
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigurationError> {
        if hour > 23 || minute > 59 {
            return Err(ConfigurationError::InvalidTimeOfDay(format!(
                "{hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Truncate a chrono time to minute resolution
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Minutes elapsed since midnight
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl FromStr for TimeOfDay {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidTimeOfDay(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// How a time window is written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindowSpec {
    /// Start, `HH:MM`
    pub start: String,
    /// End, `HH:MM`
    pub end: String,
}

impl TimeWindowSpec {
    /// Convenience constructor
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// An inclusive, same-day time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    /// Create a window with validation
    ///
    /// # Errors
    ///
    /// Returns `MidnightCrossingWindow` if `start > end`
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ConfigurationError> {
        if start > end {
            return Err(ConfigurationError::MidnightCrossingWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse and validate a window from its configuration form
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimeOfDay` or `MidnightCrossingWindow`
    pub fn from_spec(spec: &TimeWindowSpec) -> Result<Self, ConfigurationError> {
        Self::new(spec.start.parse()?, spec.end.parse()?)
    }

    /// Convert back into the configuration form
    #[must_use]
    pub fn to_spec(&self) -> TimeWindowSpec {
        TimeWindowSpec::new(self.start.to_string(), self.end.to_string())
    }

    /// Start of the window
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// End of the window
    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether `now` falls inside the window, inclusive at both ends
    #[must_use]
    pub const fn contains(&self, now: TimeOfDay) -> bool {
        let minutes = now.minutes_since_midnight();
        self.start.minutes_since_midnight() <= minutes
            && minutes <= self.end.minutes_since_midnight()
    }
}

/// Whether any window contains `now`
#[must_use]
pub fn any_window_contains(windows: &[TimeWindow], now: TimeOfDay) -> bool {
    windows.iter().any(|window| window.contains(now))
}
