//! Anniversary and reminder arithmetic for pet adoption "gotcha days".
//!
//! Every operation is a pure function of an anchor date, an optional
//! reference instant (the current instant when `None`) and, for reminders,
//! a lead time in days. Results are plain serde data.

mod consts;
mod policy;
mod prelude;
mod preview;
mod reminder;
mod schedule;
mod types;
mod window;

pub use consts::*;
pub use policy::ReminderPolicy;
pub use preview::{PetCard, PetProfile, ReminderPreview, reminder_preview};
pub use reminder::{
    ReferenceInstant, ReminderError, ReminderSummary, default_offsets, describe_reminder,
    next_anniversary, reminder_date, years_elapsed,
};
pub use schedule::{PlannedReminder, SchedulePlan, plan_default_reminders, plan_reminders};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use window::{ReminderWindow, WindowError};

use crate::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use std::str::FromStr;
use types::{civil_from_days, days_from_civil};

/// A Gregorian calendar day with no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid ISO date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Year {} is outside 1-{}", "_0", MAX_YEAR)]
    YearOutOfRange(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first invalid component.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Same month and day in `year`. A February 29 anchor lands on
    /// February 28 when `year` is not a leap year.
    pub fn with_year(&self, year: Year) -> Self {
        let day = Day::new(self.day.get(), year, self.month)
            .unwrap_or_else(|_| Day::last_of(year, self.month));
        Self {
            year,
            month: self.month,
            day,
        }
    }

    /// Shifts the date by `days` calendar days.
    /// Returns `None` if the result leaves years `1..=MAX_YEAR`.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let (year, month, day) = civil_from_days(self.day_number().checked_add(days)?)?;
        Self::from_ymd(year, month, day).ok()
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &Self) -> i64 {
        other.day_number() - self.day_number()
    }

    fn day_number(&self) -> i64 {
        days_from_civil(self.year(), self.month(), self.day())
    }

    fn parse_field<T: FromStr>(s: &str, field: &str) -> Result<T, ParseError> {
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        field.parse().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Accepts exactly `YYYY-MM-DD`: zero-padded ASCII digits, `-` separators,
    /// no surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if s.len() != DATE_LEN {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        Self::from_ymd(
            Self::parse_field(s, year)?,
            Self::parse_field(s, month)?,
            Self::parse_field(s, day)?,
        )
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| ParseError::YearOutOfRange(date.year()))?;
        if year == 0 || year > MAX_YEAR {
            return Err(ParseError::YearOutOfRange(date.year()));
        }
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::from_ymd(year, month, day)
    }
}

impl From<CalendarDate> for (u16, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        (date.year(), date.month(), date.day())
    }
}

/// Anything that names a calendar day once time-of-day and zone are
/// dropped.
pub trait ToCalendarDate {
    /// Truncates to the UTC calendar day.
    ///
    /// # Errors
    /// Returns `ParseError` when the value is not a valid `1..=9999` date.
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError>;
}

impl ToCalendarDate for CalendarDate {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        Ok(*self)
    }
}

impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        self.parse()
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        self.parse()
    }
}

impl ToCalendarDate for NaiveDate {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        CalendarDate::try_from(*self)
    }
}

/// Naive timestamps are read as UTC.
impl ToCalendarDate for NaiveDateTime {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        CalendarDate::try_from(self.date())
    }
}

impl<Tz: TimeZone> ToCalendarDate for DateTime<Tz> {
    fn to_calendar_date(&self) -> Result<CalendarDate, ParseError> {
        CalendarDate::try_from(self.naive_utc().date())
    }
}

/// Formats any date-like value as its UTC `YYYY-MM-DD` calendar day.
///
/// # Errors
/// Returns `ReminderError::InvalidDateFormat` if the value is not a valid date.
pub fn format_date<D: ToCalendarDate + ?Sized>(date: &D) -> Result<String, ReminderError> {
    Ok(date.to_calendar_date()?.to_string())
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
