//! Anniversary and reminder calculations.
//!
//! All entry points take the anchor as a `YYYY-MM-DD` string and an
//! optional reference instant. Both sides are reduced to UTC calendar days
//! before they are compared.

use chrono::{DateTime, Utc};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DEFAULT_LEAD_TIMES, ParseError, ToCalendarDate, Year};

/// The "current time" every calculation is relative to.
pub type ReferenceInstant = DateTime<Utc>;

/// Error type for reminder calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReminderError {
    /// A date string did not match `YYYY-MM-DD` or named an impossible day.
    #[error(transparent)]
    InvalidDateFormat(#[from] ParseError),

    /// A numeric argument was negative or outside its allowed range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The entity passed to a preview lacks a field it needs.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Date arithmetic left the representable years.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Countdown data for one reminder, ready to serialize to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSummary {
    pub reminder_date:          CalendarDate,
    pub next_anniversary:       CalendarDate,
    pub days_until_reminder:    u64,
    pub days_until_anniversary: u64,
    pub lead_time_days:         u64,
    pub years_elapsed:          u16,
}

/// Resolves the reference instant to its UTC calendar day, reading the
/// clock only when the caller gave none.
pub(crate) fn reference_day(reference: Option<ReferenceInstant>) -> Result<CalendarDate, ReminderError> {
    let instant = reference.unwrap_or_else(Utc::now);
    Ok(instant.to_calendar_date()?)
}

/// Next occurrence of `anchor`'s month and day on or after `today`.
pub(crate) fn next_occurrence(anchor: &CalendarDate, today: &CalendarDate) -> Result<CalendarDate, ReminderError> {
    let this_year = anchor.with_year(today.year_typed());
    if this_year >= *today {
        return Ok(this_year);
    }

    let following = today
        .year()
        .checked_add(1)
        .and_then(|y| Year::new(y).ok())
        .ok_or_else(|| ReminderError::OutOfRange(format!("anniversary after {today}")))?;
    Ok(anchor.with_year(following))
}

pub(crate) fn lead_days_from(lead_days: i64) -> Result<u32, ReminderError> {
    u32::try_from(lead_days).map_err(|_| {
        ReminderError::InvalidArgument(format!("lead time must be a non-negative integer, got {lead_days}"))
    })
}

/// Date `lead_days` before the next anniversary.
pub(crate) fn offset_before(anniversary: &CalendarDate, lead_days: u32) -> Result<CalendarDate, ReminderError> {
    anniversary
        .add_days(-i64::from(lead_days))
        .ok_or_else(|| ReminderError::OutOfRange(format!("{lead_days} days before {anniversary}")))
}

/// Returns the anniversary of `anchor` in the reference year if it falls on
/// or after the reference day, otherwise the one in the following year.
///
/// A February 29 anchor resolves to February 28 in non-leap years.
///
/// # Errors
/// `InvalidDateFormat` for a malformed anchor, `OutOfRange` past year 9999.
pub fn next_anniversary(anchor: &str, reference: Option<ReferenceInstant>) -> Result<CalendarDate, ReminderError> {
    let anchor: CalendarDate = anchor.parse()?;
    let today = reference_day(reference)?;
    let next = next_occurrence(&anchor, &today)?;
    trace!("next anniversary of {anchor} from {today} is {next}");
    Ok(next)
}

/// Reminder date `lead_days` calendar days before the next anniversary,
/// formatted as `YYYY-MM-DD`. Range policy is left to the caller.
///
/// # Errors
/// `InvalidArgument` for a negative lead time, `InvalidDateFormat` for a
/// malformed anchor.
pub fn reminder_date(anchor: &str, lead_days: i64, reference: Option<ReferenceInstant>) -> Result<String, ReminderError> {
    let lead_days = lead_days_from(lead_days)?;
    let anniversary = next_anniversary(anchor, reference)?;
    Ok(offset_before(&anniversary, lead_days)?.to_string())
}

/// Years between the anchor and its next anniversary. Never negative: an
/// anchor in the future counts as zero.
///
/// # Errors
/// `InvalidDateFormat` for a malformed anchor.
pub fn years_elapsed(anchor: &str, reference: Option<ReferenceInstant>) -> Result<u16, ReminderError> {
    let anchor_date: CalendarDate = anchor.parse()?;
    let anniversary = next_anniversary(anchor, reference)?;
    Ok(anniversary.year().saturating_sub(anchor_date.year()))
}

/// Countdown figures for a stored reminder. Day counts are floored at
/// zero, so a reminder already in the past reports 0 days away.
///
/// # Errors
/// `InvalidDateFormat` if either date string is malformed.
pub fn describe_reminder(
    reminder_iso: &str,
    anchor: &str,
    reference: Option<ReferenceInstant>,
) -> Result<ReminderSummary, ReminderError> {
    let reminder: CalendarDate = reminder_iso.parse()?;
    let anchor_date: CalendarDate = anchor.parse()?;
    // One clock read for every count below.
    let today = reference_day(reference)?;
    let next = next_occurrence(&anchor_date, &today)?;

    let summary = ReminderSummary {
        reminder_date:          reminder,
        next_anniversary:       next,
        days_until_reminder:    today.days_until(&reminder).max(0).unsigned_abs(),
        days_until_anniversary: today.days_until(&next).max(0).unsigned_abs(),
        lead_time_days:         reminder.days_until(&next).max(0).unsigned_abs(),
        years_elapsed:          next.year().saturating_sub(anchor_date.year()),
    };
    trace!("reminder {reminder} for anchor {anchor_date}: {summary:?}");
    Ok(summary)
}

/// Lead times of the reminders created for every anniversary cycle.
pub const fn default_offsets() -> [u32; 3] {
    DEFAULT_LEAD_TIMES
}
