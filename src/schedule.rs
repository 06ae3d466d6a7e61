//! Planning which reminders to create for a pet's next anniversary.
//!
//! The store is not touched here: callers pass in the dates of reminders
//! that are already pending and persist whatever the plan returns.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::CalendarDate;
use crate::reminder::{
    ReferenceInstant, ReminderError, default_offsets, next_occurrence, offset_before, reference_day,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedReminder {
    pub reminder_date:  CalendarDate,
    pub lead_time_days: u32,
}

/// Reminders to create, in lead-time order, and how many were skipped
/// because a pending reminder already falls on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePlan {
    pub next_anniversary: CalendarDate,
    pub scheduled:        Vec<PlannedReminder>,
    pub skipped:          usize,
}

/// Plans one reminder per entry of `lead_times` before the next
/// anniversary of `anchor`.
///
/// A lead time is skipped when `pending` already holds its date, or when an
/// earlier lead time in the same call produced that date.
///
/// # Errors
/// `InvalidDateFormat` for a malformed anchor, `OutOfRange` when a reminder
/// would fall before year 1.
pub fn plan_reminders(
    anchor: &str,
    lead_times: &[u32],
    pending: &[CalendarDate],
    reference: Option<ReferenceInstant>,
) -> Result<SchedulePlan, ReminderError> {
    let anchor: CalendarDate = anchor.parse()?;
    let today = reference_day(reference)?;
    let anniversary = next_occurrence(&anchor, &today)?;

    let mut taken: HashSet<CalendarDate> = pending.iter().copied().collect();
    let mut plan = SchedulePlan {
        next_anniversary: anniversary,
        scheduled:        Vec::with_capacity(lead_times.len()),
        skipped:          0,
    };

    for &lead_time_days in lead_times {
        let reminder_date = offset_before(&anniversary, lead_time_days)?;
        if !taken.insert(reminder_date) {
            debug!("skipping {lead_time_days}-day reminder for {anniversary}: {reminder_date} already pending");
            plan.skipped += 1;
            continue;
        }
        plan.scheduled.push(PlannedReminder {
            reminder_date,
            lead_time_days,
        });
    }

    debug!(
        "planned {} reminders for anniversary {anniversary} ({} skipped)",
        plan.scheduled.len(),
        plan.skipped
    );
    Ok(plan)
}

/// [`plan_reminders`] with the [`default_offsets`] cadence.
///
/// # Errors
/// Same as [`plan_reminders`].
pub fn plan_default_reminders(
    anchor: &str,
    pending: &[CalendarDate],
    reference: Option<ReferenceInstant>,
) -> Result<SchedulePlan, ReminderError> {
    plan_reminders(anchor, &default_offsets(), pending, reference)
}
