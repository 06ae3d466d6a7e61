use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::reminder::ReferenceInstant;
use crate::{CalendarDate, ParseError, ToCalendarDate, WINDOW_SEPARATOR, prelude::*};

/// An inclusive span of calendar days, used to list upcoming reminders.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct ReminderWindow {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for reminder windows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Start date is after end date.
    #[error("Invalid reminder window: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing one of the dates.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid window format.
    #[error("Invalid window format: {0}")]
    InvalidFormat(String),

    /// The window would end after year 9999.
    #[error("Reminder window of {days} days from {start} is out of range")]
    OutOfRange { start: CalendarDate, days: u32 },
}

impl ReminderWindow {
    /// # Errors
    /// Returns `WindowError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The reference day through `days` days after it.
    ///
    /// # Errors
    /// Returns `WindowError::OutOfRange` if the end would pass year 9999.
    pub fn upcoming(days: u32, reference: Option<ReferenceInstant>) -> Result<Self, WindowError> {
        let start = reference.unwrap_or_else(Utc::now).to_calendar_date()?;
        let end = start
            .add_days(i64::from(days))
            .ok_or(WindowError::OutOfRange { start, days })?;
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> u64 {
        self.start.days_until(&self.end).unsigned_abs() + 1
    }
}

impl FromStr for ReminderWindow {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start, end)) = s.split_once(WINDOW_SEPARATOR) else {
            return Err(WindowError::InvalidFormat(format!(
                "No window separator found (expected '{WINDOW_SEPARATOR}'): {s}"
            )));
        };
        if end.contains(WINDOW_SEPARATOR) {
            return Err(WindowError::InvalidFormat(format!(
                "Too many '{WINDOW_SEPARATOR}' separators: {s}"
            )));
        }
        Self::new(start.parse()?, end.parse()?)
    }
}

impl Serialize for ReminderWindow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
