use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LEAD_DAYS, DEFAULT_LEAD_TIMES, DEFAULT_WINDOW_DAYS, MAX_LEAD_DAYS, MAX_WINDOW_DAYS};
use crate::reminder::ReminderError;

/// Limits applied by the scheduling layer before it asks for reminder dates.
///
/// Every field has a default, so an empty document deserializes to
/// [`ReminderPolicy::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReminderPolicy {
    /// Lead times of the reminders created for each anniversary cycle.
    pub lead_times:          Vec<u32>,
    pub default_lead_days:   u32,
    pub max_lead_days:       u32,
    pub default_window_days: u32,
    pub max_window_days:     u32,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            lead_times:          DEFAULT_LEAD_TIMES.to_vec(),
            default_lead_days:   DEFAULT_LEAD_DAYS,
            max_lead_days:       MAX_LEAD_DAYS,
            default_window_days: DEFAULT_WINDOW_DAYS,
            max_window_days:     MAX_WINDOW_DAYS,
        }
    }
}

impl ReminderPolicy {
    /// Checks that every default sits inside its limit.
    ///
    /// # Errors
    /// Returns `ReminderError::InvalidArgument` naming the first inconsistent field.
    pub fn validate(&self) -> Result<(), ReminderError> {
        if self.lead_times.is_empty() {
            return Err(ReminderError::InvalidArgument("leadTimes must not be empty".to_owned()));
        }
        if let Some(lead) = self.lead_times.iter().find(|&&lead| lead > self.max_lead_days) {
            return Err(ReminderError::InvalidArgument(format!(
                "leadTimes entry {lead} exceeds maxLeadDays {}",
                self.max_lead_days
            )));
        }
        if self.default_lead_days > self.max_lead_days {
            return Err(ReminderError::InvalidArgument(format!(
                "defaultLeadDays {} exceeds maxLeadDays {}",
                self.default_lead_days, self.max_lead_days
            )));
        }
        if self.default_window_days > self.max_window_days {
            return Err(ReminderError::InvalidArgument(format!(
                "defaultWindowDays {} exceeds maxWindowDays {}",
                self.default_window_days, self.max_window_days
            )));
        }
        Ok(())
    }

    /// Resolves a requested lead time, falling back to the default.
    ///
    /// # Errors
    /// Returns `ReminderError::InvalidArgument` outside `0..=max_lead_days`.
    pub fn lead_days(&self, requested: Option<i64>) -> Result<u32, ReminderError> {
        let lead = Self::resolve(requested, self.default_lead_days, self.max_lead_days).ok_or_else(|| {
            ReminderError::InvalidArgument(format!(
                "daysBefore must be an integer between 0 and {}",
                self.max_lead_days
            ))
        })?;
        debug!("lead time resolved to {lead} days (requested {requested:?})");
        Ok(lead)
    }

    /// Resolves a requested upcoming-reminder window, falling back to the default.
    ///
    /// # Errors
    /// Returns `ReminderError::InvalidArgument` outside `0..=max_window_days`.
    pub fn window_days(&self, requested: Option<i64>) -> Result<u32, ReminderError> {
        let window = Self::resolve(requested, self.default_window_days, self.max_window_days).ok_or_else(|| {
            ReminderError::InvalidArgument(format!(
                "windowDays must be between 0 and {}",
                self.max_window_days
            ))
        })?;
        debug!("reminder window resolved to {window} days (requested {requested:?})");
        Ok(window)
    }

    fn resolve(requested: Option<i64>, default: u32, max: u32) -> Option<u32> {
        match requested {
            None => Some(default),
            Some(value) => u32::try_from(value).ok().filter(|&v| v <= max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ReminderPolicy::default();
        assert_eq!(policy.lead_times, vec![14, 7, 1]);
        assert_eq!(policy.lead_days(None), Ok(7));
        assert_eq!(policy.window_days(None), Ok(60));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_lead_days_bounds() {
        struct TestCase {
            requested:   Option<i64>,
            expected:    Option<u32>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                requested:   Some(0),
                expected:    Some(0),
                description: "zero is allowed",
            },
            TestCase {
                requested:   Some(180),
                expected:    Some(180),
                description: "upper limit is inclusive",
            },
            TestCase {
                requested:   Some(181),
                expected:    None,
                description: "past the upper limit",
            },
            TestCase {
                requested:   Some(-1),
                expected:    None,
                description: "negative",
            },
            TestCase {
                requested:   None,
                expected:    Some(7),
                description: "missing falls back to default",
            },
        ];

        let policy = ReminderPolicy::default();
        for case in &cases {
            let result = policy.lead_days(case.requested);
            match case.expected {
                Some(days) => assert_eq!(result, Ok(days), "{}", case.description),
                None => assert!(
                    matches!(result, Err(ReminderError::InvalidArgument(_))),
                    "Expected InvalidArgument for: {}",
                    case.description
                ),
            }
        }
    }

    #[test]
    fn test_window_days_bounds() {
        let policy = ReminderPolicy::default();
        assert_eq!(policy.window_days(Some(365)), Ok(365));
        assert!(policy.window_days(Some(366)).is_err());
        assert!(policy.window_days(Some(-5)).is_err());
    }

    #[test]
    fn test_deserialize_partial_document() {
        let policy: ReminderPolicy =
            serde_json::from_str(r#"{ "leadTimes": [30, 1], "maxLeadDays": 60 }"#).expect("failed to parse policy");
        assert_eq!(policy.lead_times, vec![30, 1]);
        assert_eq!(policy.max_lead_days, 60);
        assert_eq!(policy.default_window_days, 60);
        assert!(policy.validate().is_ok());
        assert!(policy.lead_days(Some(61)).is_err());
    }

    #[test]
    fn test_deserialize_empty_is_default() {
        let policy: ReminderPolicy = serde_json::from_str("{}").expect("failed to parse empty policy");
        assert_eq!(policy, ReminderPolicy::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<ReminderPolicy, _> = serde_json::from_str(r#"{ "leadTime": [7] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_limits() {
        let cases = [
            ReminderPolicy {
                lead_times: Vec::new(),
                ..ReminderPolicy::default()
            },
            ReminderPolicy {
                lead_times: vec![14, 200],
                ..ReminderPolicy::default()
            },
            ReminderPolicy {
                default_lead_days: 181,
                ..ReminderPolicy::default()
            },
            ReminderPolicy {
                default_window_days: 400,
                ..ReminderPolicy::default()
            },
        ];

        for policy in &cases {
            assert!(
                matches!(policy.validate(), Err(ReminderError::InvalidArgument(_))),
                "Expected {policy:?} to be rejected"
            );
        }
    }
}
