//! Reminder cards: the countdown summary plus copy shown to the owner.

use serde::{Deserialize, Serialize};

use crate::reminder::{ReferenceInstant, ReminderError, ReminderSummary, describe_reminder};

/// The pet fields a preview reads, in the shape of a stored row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
    #[serde(default)]
    pub id:                Option<String>,
    #[serde(default)]
    pub name:              Option<String>,
    #[serde(default)]
    pub gotcha_date:       Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
}

/// Pet details echoed back on a reminder card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCard {
    pub id:                Option<String>,
    pub name:              String,
    pub gotcha_date:       String,
    pub profile_photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPreview {
    #[serde(flatten)]
    pub summary:        ReminderSummary,
    pub pet:            PetCard,
    pub headline:       String,
    pub call_to_action: String,
}

fn required<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str, ReminderError> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or(ReminderError::MissingRequiredField(field))
}

const fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Builds the card shown for a scheduled reminder.
///
/// # Errors
/// `MissingRequiredField` if the pet has no name or gotcha date, and any
/// error from [`describe_reminder`].
pub fn reminder_preview(
    pet: &PetProfile,
    reminder_iso: &str,
    reference: Option<ReferenceInstant>,
) -> Result<ReminderPreview, ReminderError> {
    let name = required(pet.name.as_ref(), "name")?;
    let gotcha_date = required(pet.gotcha_date.as_ref(), "gotcha_date")?;

    let summary = describe_reminder(reminder_iso, gotcha_date, reference)?;

    let days = summary.days_until_anniversary;
    let headline = format!("{name}'s gotcha day is in {days} day{}!", plural(days));
    let call_to_action = if summary.days_until_reminder == 0 {
        format!("Celebrate today with a new post about {name}!")
    } else {
        let lead = summary.lead_time_days;
        format!("Schedule a celebration post in {lead} day{}.", plural(lead))
    };

    Ok(ReminderPreview {
        summary,
        pet: PetCard {
            id:                pet.id.clone(),
            name:              name.to_owned(),
            gotcha_date:       gotcha_date.to_owned(),
            profile_photo_url: pet.profile_photo_url.clone().filter(|url| !url.is_empty()),
        },
        headline,
        call_to_action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::reference;

    fn luna() -> PetProfile {
        PetProfile {
            id:                Some("pet-1".to_owned()),
            name:              Some("Luna".to_owned()),
            gotcha_date:       Some("2020-05-20".to_owned()),
            profile_photo_url: None,
        }
    }

    #[test]
    fn test_preview_copy() {
        let preview = reminder_preview(&luna(), "2024-05-13", Some(reference())).expect("valid preview");

        assert_eq!(preview.headline, "Luna's gotcha day is in 19 days!");
        assert_eq!(preview.call_to_action, "Schedule a celebration post in 7 days.");
        assert_eq!(
            preview.pet,
            PetCard {
                id:                Some("pet-1".to_owned()),
                name:              "Luna".to_owned(),
                gotcha_date:       "2020-05-20".to_owned(),
                profile_photo_url: None,
            }
        );
        assert_eq!(preview.summary.years_elapsed, 4);
    }

    #[test]
    fn test_preview_singular_day() {
        let preview = reminder_preview(&luna(), "2024-05-19", Some(crate::test_utils::at(2024, 5, 19, 8)))
            .expect("valid preview");
        assert_eq!(preview.headline, "Luna's gotcha day is in 1 day!");
        assert_eq!(preview.call_to_action, "Celebrate today with a new post about Luna!");

        let preview = reminder_preview(&luna(), "2024-05-19", Some(reference())).expect("valid preview");
        assert_eq!(preview.call_to_action, "Schedule a celebration post in 1 day.");
    }

    #[test]
    fn test_preview_fires_today() {
        let preview = reminder_preview(&luna(), "2024-05-01", Some(reference())).expect("valid preview");
        assert_eq!(preview.summary.days_until_reminder, 0);
        assert_eq!(preview.call_to_action, "Celebrate today with a new post about Luna!");
    }

    #[test]
    fn test_preview_requires_name_and_date() {
        struct TestCase {
            pet:      PetProfile,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                pet:      PetProfile {
                    name: None,
                    ..luna()
                },
                expected: "name",
            },
            TestCase {
                pet:      PetProfile {
                    name: Some(String::new()),
                    ..luna()
                },
                expected: "name",
            },
            TestCase {
                pet:      PetProfile {
                    gotcha_date: None,
                    ..luna()
                },
                expected: "gotcha_date",
            },
            TestCase {
                pet:      PetProfile::default(),
                expected: "name",
            },
        ];

        for case in &cases {
            let result = reminder_preview(&case.pet, "2024-05-13", Some(reference()));
            assert_eq!(result, Err(ReminderError::MissingRequiredField(case.expected)));
        }
    }

    #[test]
    fn test_preview_rejects_malformed_dates() {
        let pet = PetProfile {
            gotcha_date: Some("05-20-2020".to_owned()),
            ..luna()
        };
        let result = reminder_preview(&pet, "2024-05-13", Some(reference()));
        assert!(matches!(result, Err(ReminderError::InvalidDateFormat(_))));

        let result = reminder_preview(&luna(), "2024/05/13", Some(reference()));
        assert!(matches!(result, Err(ReminderError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_preview_json_shape() {
        let pet: PetProfile = serde_json::from_value(serde_json::json!({
            "id": "pet-1",
            "name": "Luna",
            "gotcha_date": "2020-05-20",
        }))
        .expect("failed to deserialize pet row");
        let preview = reminder_preview(&pet, "2024-05-13", Some(reference())).expect("valid preview");
        let json = serde_json::to_value(&preview).expect("failed to serialize preview");

        assert_eq!(json["reminderDate"], "2024-05-13");
        assert_eq!(json["daysUntilAnniversary"], 19);
        assert_eq!(json["callToAction"], "Schedule a celebration post in 7 days.");
        assert_eq!(
            json["pet"],
            serde_json::json!({
                "id": "pet-1",
                "name": "Luna",
                "gotchaDate": "2020-05-20",
                "profilePhotoUrl": null,
            })
        );
    }
}
